use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::{TokenClaims, UserRole};

use crate::shared::error::AppError;

/// Middleware that requires a valid bearer token
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = claims_from_headers(req.headers())?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires a valid bearer token with the admin role
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = claims_from_headers(req.headers())?;
    if claims.role != UserRole::Admin {
        tracing::warn!("User {} denied admin route {}", claims.user_id, req.uri().path());
        return Err(AppError::Forbidden("Admin privileges required".to_string()));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn claims_from_headers(headers: &HeaderMap) -> Result<TokenClaims, AppError> {
    let token = bearer_token(headers).ok_or_else(AppError::credentials)?;
    super::jwt::validate_token(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {:#}", e);
        AppError::credentials()
    })
}

/// Token of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
