use serde::Deserialize;
use std::time::Duration;

use crate::shared::error::{AppError, AppResult};

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Subset of Google's tokeninfo response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
}

/// Verified identity of a Google account
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleProfile {
    pub email: String,
    pub name: String,
    pub google_id: Option<String>,
}

/// Ask Google to verify an ID token and return the account it belongs to.
/// Without a configured client id every token is refused.
pub async fn verify_id_token(token: &str, client_id: Option<&str>) -> AppResult<GoogleProfile> {
    let client_id = require_client_id(client_id)?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(anyhow::Error::from)?;

    let response = client
        .get(TOKENINFO_URL)
        .query(&[("id_token", token)])
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Google tokeninfo request failed: {}", e);
            AppError::bad_request("Invalid Google token")
        })?;

    if !response.status().is_success() {
        tracing::info!("Google rejected ID token with status {}", response.status());
        return Err(AppError::bad_request("Invalid Google token"));
    }

    let info: TokenInfo = response
        .json()
        .await
        .map_err(|_| AppError::bad_request("Invalid Google token"))?;

    profile_from_token_info(info, Some(client_id))
}

fn require_client_id(client_id: Option<&str>) -> AppResult<&str> {
    client_id.ok_or_else(|| AppError::bad_request("Google sign-in is not configured"))
}

/// Audience and email checks on an already fetched tokeninfo payload
pub fn profile_from_token_info(info: TokenInfo, client_id: Option<&str>) -> AppResult<GoogleProfile> {
    let expected = require_client_id(client_id)?;
    if info.aud.as_deref() != Some(expected) {
        return Err(AppError::bad_request("Token audience mismatch"));
    }

    let email = info
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Email not provided by Google"))?;

    Ok(GoogleProfile {
        email,
        name: info
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Google User".to_string()),
        google_id: info.sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::parse_config;

    fn info() -> TokenInfo {
        TokenInfo {
            aud: Some("client-1".into()),
            email: Some("ann@example.com".into()),
            name: None,
            sub: Some("1234".into()),
        }
    }

    #[test]
    fn test_profile_defaults_name() {
        let p = profile_from_token_info(info(), Some("client-1")).unwrap();
        assert_eq!(p.email, "ann@example.com");
        assert_eq!(p.name, "Google User");
        assert_eq!(p.google_id.as_deref(), Some("1234"));
    }

    #[test]
    fn test_foreign_audience_rejected() {
        let err = profile_from_token_info(info(), Some("client-2")).unwrap_err();
        assert_eq!(err.to_string(), "Token audience mismatch");
    }

    #[test]
    fn test_unconfigured_client_id_rejects_every_token() {
        let config = parse_config(include_str!("../../../../../config.toml")).unwrap();
        let mut foreign = info();
        foreign.aud = Some("some-other-app.apps.googleusercontent.com".into());
        foreign.email = Some("admin@example.com".into());

        let err = profile_from_token_info(foreign, config.auth.google_client_id()).unwrap_err();
        assert_eq!(err.to_string(), "Google sign-in is not configured");
        assert!(profile_from_token_info(info(), None).is_err());
    }

    #[tokio::test]
    async fn test_verify_refuses_before_calling_google() {
        let err = verify_id_token("any-token", None).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Google sign-in is not configured");
    }

    #[test]
    fn test_missing_email() {
        let mut i = info();
        i.email = Some(String::new());
        let err = profile_from_token_info(i, Some("client-1")).unwrap_err();
        assert_eq!(err.to_string(), "Email not provided by Google");
    }
}
