//! API utilities for frontend-backend communication
//!
//! Helpers for constructing API URLs and making requests. The bearer token is
//! read from local storage every time a request is built.

use contracts::system::auth::ErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/fmcg/trend?metric=sales");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Failure of an API call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401: the session is gone and the user has to sign in again
    Unauthorized,
    /// Any other non-2xx answer, with the server's `detail` when it sent one
    Http { status: u16, detail: Option<String> },
    Network(String),
    Parse(String),
}

impl ApiError {
    /// Text for inline form errors: server detail first, else the fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::Http {
                status,
                detail: Some(detail),
            } => write!(f, "HTTP {}: {}", status, detail),
            ApiError::Http { status, detail: None } => write!(f, "HTTP error: {}", status),
            ApiError::Network(e) => write!(f, "Request failed: {}", e),
            ApiError::Parse(e) => write!(f, "Failed to parse response: {}", e),
        }
    }
}

fn with_bearer(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !response.ok() {
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.detail);
        return Err(ApiError::Http { status, detail });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// GET `path` (with query string) as JSON, bearer attached
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = with_bearer(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

/// POST a JSON body and decode the JSON answer
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = with_bearer(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = ApiError::Http {
            status: 400,
            detail: Some("Email already registered".into()),
        };
        assert_eq!(err.user_message("Signup failed"), "Email already registered");
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Signup failed"),
            "Signup failed"
        );
        assert_eq!(
            ApiError::Http { status: 500, detail: None }.to_string(),
            "HTTP error: 500"
        );
    }
}
