use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    AuthResponse, GoogleAuthRequest, GoogleSignInConfig, LoginRequest, SignupRequest, UserInfo,
};
use once_cell::sync::OnceCell;

use crate::shared::data::db::get_connection;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{google, jwt};
use crate::system::users::service as user_service;

static GOOGLE_CLIENT_ID: OnceCell<Option<String>> = OnceCell::new();

/// Remember the configured OAuth client id for token audience checks
pub fn set_google_client_id(client_id: Option<&str>) {
    let _ = GOOGLE_CLIENT_ID.set(client_id.map(str::to_string));
}

fn google_client_id() -> Option<&'static str> {
    GOOGLE_CLIENT_ID.get().and_then(|id| id.as_deref())
}

/// POST /signup
pub async fn signup(Json(request): Json<SignupRequest>) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let user = user_service::signup(get_connection(), request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login
pub async fn login(Json(request): Json<LoginRequest>) -> AppResult<Json<AuthResponse>> {
    let user = user_service::authenticate(get_connection(), &request).await?;
    let access_token = jwt::generate_access_token(user.id, user.role)?;
    tracing::info!("User {} logged in", user.id);
    Ok(Json(AuthResponse::bearer(access_token, user)))
}

/// POST /auth/google
pub async fn google_login(Json(request): Json<GoogleAuthRequest>) -> AppResult<Json<AuthResponse>> {
    let profile = google::verify_id_token(&request.token, google_client_id()).await?;
    let user =
        user_service::upsert_google_user(get_connection(), &profile, request.role.as_deref()).await?;
    let access_token = jwt::generate_access_token(user.id, user.role)?;
    tracing::info!("User {} logged in with Google", user.id);
    Ok(Json(AuthResponse::bearer(access_token, user)))
}

/// GET /auth/google/config
pub async fn google_config() -> Json<GoogleSignInConfig> {
    Json(GoogleSignInConfig {
        client_id: google_client_id().map(str::to_string),
    })
}

/// GET /me (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> AppResult<Json<UserInfo>> {
    let user = user_service::current_user(get_connection(), claims.user_id).await?;
    Ok(Json(user))
}
