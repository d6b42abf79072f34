//! Fixed top bar: brand, project chip, inbox popup, notifications and the
//! profile menu with logout.

use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::system::auth::context::{sign_out, use_auth};

#[component]
fn MailboxPopup() -> impl IntoView {
    view! {
        <div class="mailbox-popup" on:click=|ev| ev.stop_propagation()>
            <h3 class="mailbox-popup__title">"Inbox"</h3>
            <ul class="mailbox-popup__list">
                <li>
                    <p class="mailbox-popup__subject">"Project Update"</p>
                    <p class="mailbox-popup__text">"New CSF results are available."</p>
                </li>
                <li>
                    <p class="mailbox-popup__subject">"Reminder"</p>
                    <p class="mailbox-popup__text">"Team sync tomorrow at 10 AM."</p>
                </li>
            </ul>
            <p class="mailbox-popup__footer">"View All"</p>
        </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let (show_mailbox, set_show_mailbox) = signal(false);
    let (show_profile, set_show_profile) = signal(false);

    let user_name = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.name)
            .unwrap_or_else(|| "Guest".to_string())
    };

    let logout = move |_| {
        log::info!("Logging out");
        sign_out(set_auth_state);
    };

    view! {
        <header class="app-header">
            <div class="app-header__brand">
                <button class="app-header__icon-btn" title="Menu">
                    {icon("menu")}
                </button>
                <span class="app-header__title">"Quant Matrix AI"</span>
            </div>

            <div class="app-header__actions">
                <div class="app-header__project">
                    {icon("plus")}
                    <span>"Project Name"</span>
                </div>

                <div class="app-header__mailbox" on:mouseleave=move |_| set_show_mailbox.set(false)>
                    <button
                        class="app-header__icon-btn"
                        title="Inbox"
                        on:click=move |_| set_show_mailbox.update(|v| *v = !*v)
                    >
                        {icon("mail")}
                    </button>
                    <Show when=move || show_mailbox.get()>
                        <MailboxPopup />
                    </Show>
                </div>

                <button class="app-header__icon-btn app-header__icon-btn--dot" title="Notifications">
                    {icon("bell")}
                </button>

                <div
                    class="app-header__profile"
                    on:mouseenter=move |_| set_show_profile.set(true)
                    on:mouseleave=move |_| set_show_profile.set(false)
                >
                    <span class="app-header__avatar">{icon("user")}</span>
                    <span class="app-header__user">{user_name}</span>
                    <Show when=move || show_profile.get()>
                        <div class="app-header__menu">
                            <button class="app-header__menu-item" on:click=logout>
                                {icon("log-out")}
                                "Logout"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </header>
    }
}
