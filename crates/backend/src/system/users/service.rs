use contracts::system::auth::{AuthProvider, LoginRequest, SignupRequest, UserInfo, UserRole};
use sea_orm::ConnectionTrait;

use super::repository::{self, NewUser};
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::google::GoogleProfile;
use crate::system::auth::password;

const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Register a local account
pub async fn signup<C: ConnectionTrait>(db: &C, request: SignupRequest) -> AppResult<UserInfo> {
    let name = request.name.trim();
    let email = request.email.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Name cannot be empty"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::bad_request("Invalid email format"));
    }
    if request.password.is_empty() {
        return Err(AppError::bad_request("Password cannot be empty"));
    }

    if repository::get_by_email(db, email).await?.is_some() {
        return Err(AppError::bad_request("Email already registered"));
    }

    let role = UserRole::parse(request.role.as_deref()).map_err(AppError::BadRequest)?;
    let password_hash = password::hash_password(&request.password)?;

    let id = repository::create(
        db,
        &NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash),
            role,
            provider: AuthProvider::Local,
            google_id: None,
        },
    )
    .await?;

    tracing::info!("Registered user {} ({})", id, role.as_str());
    Ok(UserInfo {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
    })
}

/// Check email and password; every failure is the same 403
pub async fn authenticate<C: ConnectionTrait>(db: &C, request: &LoginRequest) -> AppResult<UserInfo> {
    let forbidden = || AppError::Forbidden(INVALID_CREDENTIALS.to_string());

    let user = repository::get_by_email(db, &request.email)
        .await?
        .ok_or_else(forbidden)?;

    // Google-only accounts have no password
    let hash = user.password_hash.as_deref().ok_or_else(forbidden)?;
    if !password::verify_password(&request.password, hash)? {
        return Err(forbidden());
    }

    Ok(user.to_info())
}

/// Find the account of a verified Google identity (by email, then Google id),
/// refreshing its link, or create it with the requested role
pub async fn upsert_google_user<C: ConnectionTrait>(
    db: &C,
    profile: &GoogleProfile,
    requested_role: Option<&str>,
) -> AppResult<UserInfo> {
    let role = UserRole::parse(requested_role).map_err(AppError::BadRequest)?;

    let mut existing = repository::get_by_email(db, &profile.email).await?;
    if existing.is_none() {
        if let Some(google_id) = profile.google_id.as_deref() {
            existing = repository::get_by_google_id(db, google_id).await?;
        }
    }

    if let Some(user) = existing {
        let needs_update = user.provider() != AuthProvider::Google
            || user.google_id != profile.google_id
            || user.name != profile.name;
        if needs_update {
            repository::update_google_link(db, user.id, &profile.name, profile.google_id.as_deref())
                .await?;
        }
        let mut info = user.to_info();
        info.name = profile.name.clone();
        return Ok(info);
    }

    let id = repository::create(
        db,
        &NewUser {
            name: profile.name.clone(),
            email: profile.email.clone(),
            password_hash: None,
            role,
            provider: AuthProvider::Google,
            google_id: profile.google_id.clone(),
        },
    )
    .await?;

    tracing::info!("Created Google user {} ({})", id, role.as_str());
    Ok(UserInfo {
        id,
        name: profile.name.clone(),
        email: profile.email.clone(),
        role,
    })
}

/// The user behind a token; a deleted user is treated like a bad token
pub async fn current_user<C: ConnectionTrait>(db: &C, user_id: i64) -> AppResult<UserInfo> {
    repository::get_by_id(db, user_id)
        .await?
        .map(|u| u.to_info())
        .ok_or_else(AppError::credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::memory_connection;
    use axum::http::StatusCode;

    fn signup_request(email: &str, role: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: "Ann".into(),
            email: email.into(),
            password: "pw-123".into(),
            role: role.map(str::to_string),
        }
    }

    fn profile(email: &str, google_id: &str) -> GoogleProfile {
        GoogleProfile {
            email: email.into(),
            name: "Ann Google".into(),
            google_id: Some(google_id.into()),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let db = memory_connection().await;
        let user = signup(&db, signup_request("ann@example.com", Some("Admin")))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Admin);

        let login = LoginRequest {
            email: "ann@example.com".into(),
            password: "pw-123".into(),
        };
        assert_eq!(authenticate(&db, &login).await.unwrap(), user);

        let me = current_user(&db, user.id).await.unwrap();
        assert_eq!(me.email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_login_ignores_email_padding_and_case() {
        let db = memory_connection().await;
        let user = signup(&db, signup_request("  ann@example.com ", None))
            .await
            .unwrap();
        assert_eq!(user.email, "ann@example.com");

        let login = LoginRequest {
            email: " Ann@Example.com  ".into(),
            password: "pw-123".into(),
        };
        assert_eq!(authenticate(&db, &login).await.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_signup_rejections() {
        let db = memory_connection().await;
        signup(&db, signup_request("ann@example.com", None)).await.unwrap();

        let dup = signup(&db, signup_request("ann@example.com", None))
            .await
            .unwrap_err();
        assert_eq!(dup.to_string(), "Email already registered");

        let role = signup(&db, signup_request("bob@example.com", Some("owner")))
            .await
            .unwrap_err();
        assert_eq!(role.to_string(), "Invalid role. Must be 'user' or 'admin'");

        let email = signup(&db, signup_request("bob", None)).await.unwrap_err();
        assert_eq!(email.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_failures_are_forbidden() {
        let db = memory_connection().await;
        signup(&db, signup_request("ann@example.com", None)).await.unwrap();

        for (email, pw) in [("ann@example.com", "nope"), ("nobody@example.com", "pw-123")] {
            let err = authenticate(
                &db,
                &LoginRequest {
                    email: email.into(),
                    password: pw.into(),
                },
            )
            .await
            .unwrap_err();
            assert_eq!(err.status(), StatusCode::FORBIDDEN);
            assert_eq!(err.to_string(), "Invalid Credentials");
        }
    }

    #[tokio::test]
    async fn test_google_creates_then_links() {
        let db = memory_connection().await;
        let created = upsert_google_user(&db, &profile("g@example.com", "g-1"), Some("user"))
            .await
            .unwrap();
        assert_eq!(created.name, "Ann Google");

        // second sign-in finds the same account
        let again = upsert_google_user(&db, &profile("g@example.com", "g-1"), None)
            .await
            .unwrap();
        assert_eq!(again.id, created.id);

        // Google-only accounts cannot use password login
        let err = authenticate(
            &db,
            &LoginRequest {
                email: "g@example.com".into(),
                password: String::new(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_google_links_local_account() {
        let db = memory_connection().await;
        let local = signup(&db, signup_request("ann@example.com", Some("admin")))
            .await
            .unwrap();
        let linked = upsert_google_user(&db, &profile("ann@example.com", "g-9"), Some("user"))
            .await
            .unwrap();
        assert_eq!(linked.id, local.id);
        // the stored role wins over the requested one
        assert_eq!(linked.role, UserRole::Admin);
        assert_eq!(linked.name, "Ann Google");

        let stored = repository::get_by_google_id(&db, "g-9").await.unwrap().unwrap();
        assert_eq!(stored.provider(), AuthProvider::Google);
    }

    #[tokio::test]
    async fn test_unknown_user_is_unauthorized() {
        let db = memory_connection().await;
        let err = current_user(&db, 99).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
