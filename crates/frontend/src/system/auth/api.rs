use contracts::system::auth::{
    AuthResponse, GoogleAuthRequest, GoogleSignInConfig, LoginRequest, SignupRequest, UserInfo,
};

use crate::shared::api_utils::{get_json, post_json, ApiError};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<AuthResponse, ApiError> {
    post_json("/login", &LoginRequest { email, password }).await
}

/// Register an account; the caller logs in afterwards
pub async fn signup(request: SignupRequest) -> Result<UserInfo, ApiError> {
    post_json("/signup", &request).await
}

/// Exchange a Google ID token (credential) for an access token
pub async fn google_login(token: String, role: Option<String>) -> Result<AuthResponse, ApiError> {
    post_json("/auth/google", &GoogleAuthRequest { token, role }).await
}

/// Client id for the Google sign-in button, if the server has one
pub async fn google_config() -> Result<GoogleSignInConfig, ApiError> {
    get_json("/auth/google/config").await
}

/// Get current user info (token from local storage)
pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    get_json("/me").await
}
