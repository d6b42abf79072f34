use leptos::prelude::*;

/// Stand-in for pages and data tabs without charts yet
#[component]
pub fn Placeholder() -> impl IntoView {
    view! {
        <div class="placeholder">
            <img src="/cmdata.png" alt="Coming soon" class="placeholder__image" />
        </div>
    }
}
