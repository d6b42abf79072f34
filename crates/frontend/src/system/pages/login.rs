use contracts::system::auth::{SignupRequest, UserRole};
use gloo_timers::future::TimeoutFuture;
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::{sign_in, use_auth, AuthState};
use crate::system::auth::{api, google};

const REDIRECT_DELAY_MS: u32 = 1_000;
const GENERIC_ERROR: &str = "Something went wrong! Please try again.";
const GOOGLE_ERROR: &str = "Google sign-in failed. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq)]
enum MessageKind {
    Success,
    Error,
}

type Message = Option<(MessageKind, String)>;

/// Show the success message, wait a moment, then enter the dashboard
async fn finish_login(
    response: contracts::system::auth::AuthResponse,
    set_message: WriteSignal<Message>,
    set_auth_state: WriteSignal<AuthState>,
) {
    set_message.set(Some((
        MessageKind::Success,
        "Login successful! Redirecting...".to_string(),
    )));
    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
    sign_in(set_auth_state, response);
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (is_signup, set_is_signup) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(UserRole::User);
    let (message, set_message) = signal(Message::None);
    let (is_loading, set_is_loading) = signal(false);
    let (is_google_loading, set_is_google_loading) = signal(false);

    let (google_client_id, set_google_client_id) = signal(None::<String>);
    let (google_ready, set_google_ready) = signal(false);
    let (google_config_loaded, set_google_config_loaded) = signal(false);
    let google_button = NodeRef::<Div>::new();

    let (_, set_auth_state) = use_auth();

    // Client id and script availability for the Google button
    Effect::new(move |_| {
        spawn_local(async move {
            match api::google_config().await {
                Ok(config) => set_google_client_id.set(config.client_id),
                Err(e) => log::warn!("Failed to load Google sign-in config: {}", e),
            }
            set_google_config_loaded.set(true);
            if google::wait_for_script().await {
                set_google_ready.set(true);
            } else {
                log::warn!("Google Sign-In script did not load");
            }
        });
    });

    let on_google_credential = move |credential: String| {
        let requested_role = if is_signup.get_untracked() {
            role.get_untracked()
        } else {
            UserRole::User
        };
        set_is_google_loading.set(true);
        set_message.set(None);
        spawn_local(async move {
            match api::google_login(credential, Some(requested_role.as_str().to_string())).await {
                Ok(response) => finish_login(response, set_message, set_auth_state).await,
                Err(e) => {
                    log::error!("Google login failed: {}", e);
                    set_message.set(Some((MessageKind::Error, e.user_message(GOOGLE_ERROR))));
                }
            }
            set_is_google_loading.set(false);
        });
    };

    // Redraw the button when the mode changes (sign in / sign up text)
    Effect::new(move |_| {
        let signup = is_signup.get();
        let (Some(client_id), true, Some(container)) =
            (google_client_id.get(), google_ready.get(), google_button.get())
        else {
            return;
        };
        if let Err(e) = google::render_button(&container, &client_id, signup, on_google_credential) {
            log::error!("Error initializing Google Sign-In: {:?}", e);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        set_is_loading.set(true);
        set_message.set(None);

        let signup = is_signup.get_untracked();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let name_val = name.get_untracked();
        let role_val = role.get_untracked();

        spawn_local(async move {
            if signup {
                let request = SignupRequest {
                    name: name_val,
                    email: email_val,
                    password: password_val,
                    role: Some(role_val.as_str().to_string()),
                };
                match api::signup(request).await {
                    Ok(user) => {
                        log::info!("Registered user {}", user.id);
                        set_message.set(Some((
                            MessageKind::Success,
                            "Signup successful! Please login now.".to_string(),
                        )));
                        set_is_signup.set(false);
                        set_name.set(String::new());
                        set_email.set(String::new());
                        set_password.set(String::new());
                    }
                    Err(e) => {
                        set_message.set(Some((MessageKind::Error, e.user_message(GENERIC_ERROR))));
                    }
                }
                set_is_loading.set(false);
            } else {
                match api::login(email_val, password_val).await {
                    Ok(response) => {
                        set_is_loading.set(false);
                        finish_login(response, set_message, set_auth_state).await;
                    }
                    Err(e) => {
                        set_message.set(Some((MessageKind::Error, e.user_message(GENERIC_ERROR))));
                        set_is_loading.set(false);
                    }
                }
            }
        });
    };

    let toggle_mode = move || {
        set_is_signup.update(|s| *s = !*s);
        set_message.set(None);
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>{move || if is_signup.get() { "Create Your Account" } else { "Welcome Back" }}</h2>
                <p class="login-subtitle">
                    {move || {
                        if is_signup.get() {
                            "Sign up to access your dashboard"
                        } else {
                            "Sign in to continue to your dashboard"
                        }
                    }}
                </p>

                <form on:submit=on_submit>
                    <Show when=move || is_signup.get()>
                        <div class="form-group">
                            <label for="name">"Name"</label>
                            <input
                                type="text"
                                id="name"
                                placeholder="Enter your name"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                required
                            />
                        </div>
                    </Show>

                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <Show when=move || is_signup.get()>
                        <div class="form-group">
                            <label for="role">"Select Role"</label>
                            <select
                                id="role"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_role.set(UserRole::parse(Some(&value)).unwrap_or_default());
                                }
                            >
                                <option value="user" selected=move || role.get() == UserRole::User>"User"</option>
                                <option value="admin" selected=move || role.get() == UserRole::Admin>"Admin"</option>
                            </select>
                        </div>
                    </Show>

                    {move || {
                        message
                            .get()
                            .map(|(kind, text)| {
                                let class = match kind {
                                    MessageKind::Success => "login-message login-message--success",
                                    MessageKind::Error => "login-message login-message--error",
                                };
                                view! { <div class=class>{text}</div> }
                            })
                    }}

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get() || is_google_loading.get()
                    >
                        {move || {
                            if is_loading.get() {
                                "Processing..."
                            } else if is_signup.get() {
                                "Sign Up"
                            } else {
                                "Sign In"
                            }
                        }}
                    </button>
                </form>

                <div class="login-divider">
                    <span>"Or continue with"</span>
                </div>

                <div
                    class=move || {
                        if is_google_loading.get() { "google-button google-button--busy" } else { "google-button" }
                    }
                    node_ref=google_button
                ></div>
                <Show when=move || google_config_loaded.get() && google_client_id.get().is_none()>
                    <p class="login-hint">"Google Sign-In is not configured on the server."</p>
                </Show>
                <Show when=move || {
                    google_client_id.get().is_some() && !google_ready.get()
                }>
                    <p class="login-hint">"Loading Google Sign-In..."</p>
                </Show>
                <Show when=move || is_google_loading.get()>
                    <p class="login-hint">"Signing in with Google..."</p>
                </Show>

                <p class="login-toggle">
                    {move || {
                        if is_signup.get() {
                            "Already have an account? "
                        } else {
                            "Don't have an account? "
                        }
                    }}
                    <a href="#" on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        toggle_mode();
                    }>
                        {move || if is_signup.get() { "Sign In" } else { "Sign Up" }}
                    </a>
                </p>
            </div>
        </div>
    }
}
