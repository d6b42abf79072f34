use leptos::prelude::*;

/// Top level pages of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTab {
    #[default]
    Trends,
    CsfResults,
    ScenarioPlanning,
}

impl AppTab {
    pub const ALL: [AppTab; 3] = [AppTab::Trends, AppTab::CsfResults, AppTab::ScenarioPlanning];

    pub fn label(&self) -> &'static str {
        match self {
            AppTab::Trends => "Trends",
            AppTab::CsfResults => "CSF Results",
            AppTab::ScenarioPlanning => "Scenario Planning",
        }
    }
}

/// Page title with the page tabs
#[component]
pub fn SubHeader(active: RwSignal<AppTab>) -> impl IntoView {
    view! {
        <div class="sub-header">
            <h2 class="sub-header__title">"Consumer Surplus Factor (CSF)"</h2>
            <div class="sub-header__tabs">
                {AppTab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class=move || {
                                    if active.get() == tab { "sub-header__tab sub-header__tab--active" } else { "sub-header__tab" }
                                }
                                on:click=move |_| active.set(tab)
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
