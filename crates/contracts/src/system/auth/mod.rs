use serde::{Deserialize, Serialize};

pub const INVALID_ROLE: &str = "Invalid role. Must be 'user' or 'admin'";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Case-insensitive; a missing or blank role is `User`
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(UserRole::User);
        };
        match raw.to_ascii_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            _ => Err(INVALID_ROLE.to_string()),
        }
    }
}

/// How the account was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }

    pub fn from_db(raw: &str) -> Self {
        match raw {
            "google" => AuthProvider::Google,
            _ => AuthProvider::Local,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthRequest {
    /// Google ID token (credential) from the sign-in button
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Cached user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

impl AuthResponse {
    pub fn bearer(access_token: String, user: UserInfo) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user: Some(user),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i64,
    pub role: UserRole,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

/// Public sign-in settings the login page needs before any token exists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleSignInConfig {
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse(None), Ok(UserRole::User));
        assert_eq!(UserRole::parse(Some("  ")), Ok(UserRole::User));
        assert_eq!(UserRole::parse(Some("ADMIN")), Ok(UserRole::Admin));
        assert_eq!(UserRole::parse(Some("root")), Err(INVALID_ROLE.to_string()));
    }

    #[test]
    fn test_auth_response_wire_format() {
        let user = UserInfo {
            id: 7,
            name: "Ann".into(),
            email: "ann@example.com".into(),
            role: UserRole::Admin,
        };
        let json = serde_json::to_value(AuthResponse::bearer("t".into(), user)).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["user"]["role"], "admin");
    }
}
