pub mod header;
pub mod placeholder;
pub mod sub_header;

use leptos::prelude::*;

use header::Header;
use placeholder::Placeholder;
use sub_header::{AppTab, SubHeader};

use crate::dashboards::d400_fmcg_trends::ui::FmcgTrendsDashboard;

/// Authenticated shell: header, page tabs and the active page
#[component]
pub fn Shell() -> impl IntoView {
    let active = RwSignal::new(AppTab::default());

    view! {
        <div class="app-layout">
            <Header />
            <main class="app-main">
                <SubHeader active=active />
                {move || match active.get() {
                    AppTab::Trends => view! { <FmcgTrendsDashboard /> }.into_any(),
                    _ => view! { <Placeholder /> }.into_any(),
                }}
            </main>
        </div>
    }
}
