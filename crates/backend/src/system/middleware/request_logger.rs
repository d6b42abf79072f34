use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_size;

/// Logs every HTTP request: method, path, status, latency, response size.
///
/// The body is buffered to measure its real size, then passed on unchanged.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                %method,
                %path,
                status = parts.status.as_u16(),
                latency_ms = start.elapsed().as_millis() as u64,
                "response body could not be read: {}",
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    let size = format_size(bytes.len());
    if parts.status.is_server_error() {
        tracing::error!(%method, %path, status, latency_ms, %size, "request failed");
    } else if parts.status.is_client_error() {
        tracing::warn!(%method, %path, status, latency_ms, %size, "request rejected");
    } else {
        tracing::info!(%method, %path, status, latency_ms, %size, "request");
    }

    Response::from_parts(parts, Body::from(bytes))
}
