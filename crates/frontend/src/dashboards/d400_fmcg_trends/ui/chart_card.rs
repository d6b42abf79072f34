//! Card frame around one chart: title, optional metric switch, loading text.

use contracts::dashboards::d400_fmcg_trends::Metric;
use leptos::prelude::*;
use thaw::Card;

/// Sales / volume switch used in card headers
#[component]
pub fn MetricSelect(metric: RwSignal<Metric>) -> impl IntoView {
    view! {
        <select
            class="metric-select"
            on:change=move |ev| metric.set(Metric::from_key(&event_target_value(&ev)))
        >
            {[Metric::Sales, Metric::Volume]
                .into_iter()
                .map(|m| {
                    view! {
                        <option value=m.key() selected=move || metric.get() == m>
                            {m.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

/// Thaw [`Card`] that fades in after `delay_ms` and shows
/// `Loading <title>...` instead of its content while `loading` is set.
#[component]
pub fn ChartCard(
    title: &'static str,
    #[prop(into)] loading: Signal<bool>,
    /// Metric switch shown next to the title
    #[prop(optional)]
    metric: Option<RwSignal<Metric>>,
    #[prop(optional)] delay_ms: u32,
    children: ChildrenFn,
) -> impl IntoView {
    let style = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);

    view! {
        <Card attr:style=style>
            <div class="chart-card">
                <div class="chart-card__header">
                    <h2 class="chart-card__title">{title}</h2>
                    {metric.map(|metric| view! { <MetricSelect metric=metric /> })}
                </div>
                {move || {
                    if loading.get() {
                        view! { <p class="chart-card__loading">{format!("Loading {}...", title)}</p> }
                            .into_any()
                    } else {
                        children().into_any()
                    }
                }}
            </div>
        </Card>
    }
}
