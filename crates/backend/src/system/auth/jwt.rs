use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::{TokenClaims, UserRole};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::config::AuthConfig;

const JWT_SECRET_KEY: &str = "jwt_secret";

/// Signing secret and access token lifetime, resolved once at start-up
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub lifetime_minutes: i64,
}

static JWT_SETTINGS: OnceCell<JwtSettings> = OnceCell::new();

/// Resolve the secret: config first, then sys_settings, else generate and persist one
pub async fn initialize<C: ConnectionTrait>(db: &C, auth: &AuthConfig) -> Result<()> {
    let secret = match auth.jwt_secret() {
        Some(secret) => {
            tracing::info!("Using JWT secret from config");
            secret.to_string()
        }
        None => get_or_create_secret(db).await?,
    };

    JWT_SETTINGS
        .set(JwtSettings {
            secret,
            lifetime_minutes: auth.access_token_minutes,
        })
        .map_err(|_| anyhow::anyhow!("JWT settings already initialized"))?;
    Ok(())
}

fn settings() -> Result<&'static JwtSettings> {
    JWT_SETTINGS
        .get()
        .context("JWT settings have not been initialized")
}

/// HS256 access token for the process-wide settings
pub fn generate_access_token(user_id: i64, role: UserRole) -> Result<String> {
    encode_token(settings()?, user_id, role)
}

/// Validate a token against the process-wide settings
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    decode_token(settings()?, token)
}

pub fn encode_token(settings: &JwtSettings, user_id: i64, role: UserRole) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::minutes(settings.lifetime_minutes)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        user_id,
        role,
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_token(settings: &JwtSettings, token: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

async fn get_or_create_secret<C: ConnectionTrait>(db: &C) -> Result<String> {
    if let Some(secret) = get_jwt_secret_from_db(db).await? {
        return Ok(secret);
    }
    tracing::info!("No JWT secret stored yet, generating one");
    let secret = generate_jwt_secret();
    save_jwt_secret_to_db(db, &secret).await?;
    Ok(secret)
}

/// 256 random bits, base64
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    general_purpose::STANDARD.encode(random_bytes)
}

async fn get_jwt_secret_from_db<C: ConnectionTrait>(db: &C) -> Result<Option<String>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get::<String>("", "value")?)),
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db<C: ConnectionTrait>(db: &C, secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            JWT_SECRET_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::memory_connection;

    fn settings(minutes: i64) -> JwtSettings {
        JwtSettings {
            secret: "test-secret".into(),
            lifetime_minutes: minutes,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let s = settings(30);
        let token = encode_token(&s, 42, UserRole::Admin).unwrap();
        let claims = decode_token(&s, &token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_token(&settings(30), 1, UserRole::User).unwrap();
        let other = JwtSettings {
            secret: "other".into(),
            lifetime_minutes: 30,
        };
        assert!(decode_token(&other, &token).is_err());
        assert!(decode_token(&other, "not.a.token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // beyond the default 60s leeway
        let token = encode_token(&settings(-5), 1, UserRole::User).unwrap();
        assert!(decode_token(&settings(30), &token).is_err());
    }

    #[tokio::test]
    async fn test_secret_is_generated_once() {
        let db = memory_connection().await;
        let first = get_or_create_secret(&db).await.unwrap();
        let second = get_or_create_secret(&db).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 44);
    }
}
