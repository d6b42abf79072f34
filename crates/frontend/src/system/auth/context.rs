use contracts::system::auth::{AuthResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_utils::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    /// Session as persisted in local storage
    pub fn from_storage() -> Self {
        Self {
            access_token: storage::get_token(),
            user_info: storage::get_user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::from_storage());

    // Refresh the cached user from the server once on mount
    Effect::new(move |_| {
        if auth_state.get_untracked().access_token.is_none() {
            return;
        }
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user_info) => {
                    storage::save_user(&user_info);
                    set_auth_state.update(|s| s.user_info = Some(user_info));
                }
                Err(ApiError::Unauthorized) => {
                    // A cached user keeps the session until a data call fails
                    if storage::get_user().is_none() {
                        log::info!("Stored token rejected, signing out");
                        sign_out(set_auth_state);
                    }
                }
                Err(e) => log::warn!("Failed to load current user: {}", e),
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Persist a successful login and switch to the dashboard
pub fn sign_in(set_auth_state: WriteSignal<AuthState>, response: AuthResponse) {
    storage::save_token(&response.access_token);
    if let Some(user) = &response.user {
        storage::save_user(user);
    }
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: response.user,
    });
}

/// Drop the stored session and return to the auth page
pub fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
}
