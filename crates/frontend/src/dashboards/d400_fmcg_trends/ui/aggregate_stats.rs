use contracts::dashboards::d400_fmcg_trends::{AggregateStats, Filters, Metric};
use contracts::shared::number_format::format_compact;
use leptos::prelude::*;
use thaw::Card;

use super::chart_card::MetricSelect;
use super::slot::ChartSlot;
use crate::dashboards::d400_fmcg_trends::api;
use crate::system::auth::context::use_auth;

fn stat_items(stats: &AggregateStats) -> [(&'static str, String); 4] {
    [
        ("Min", format_compact(stats.min)),
        ("Max", format_compact(stats.max)),
        ("Sum", format_compact(stats.sum)),
        ("Avg", format_compact(stats.avg)),
    ]
}

/// What the overview card shows
#[derive(Debug, Clone, PartialEq)]
enum Overview {
    Loading,
    /// Fetch failed or has not answered yet
    Unavailable,
    Ready([(&'static str, String); 4]),
}

fn overview(loading: bool, stats: Option<&AggregateStats>) -> Overview {
    match (loading, stats) {
        (true, _) => Overview::Loading,
        (false, None) => Overview::Unavailable,
        (false, Some(stats)) => Overview::Ready(stat_items(stats)),
    }
}

/// Min / max / sum / average of the selected metric under the applied filters
#[component]
pub fn AggregateStatsCard(#[prop(into)] filters: Signal<Filters>) -> impl IntoView {
    let (_, set_auth_state) = use_auth();
    let metric = RwSignal::new(Metric::Sales);
    let stats = ChartSlot::<AggregateStats>::new();

    Effect::new(move |_| {
        let metric = metric.get();
        let filters = filters.get();
        stats.load("overview", set_auth_state, async move {
            api::fetch_aggregate_stats(metric, &filters).await
        });
    });

    view! {
        <Card>
            <div class="stats-card">
                <div class="stats-card__header">
                    <h3 class="stats-card__title">"Overview"</h3>
                    <MetricSelect metric=metric />
                </div>
                {move || {
                    let items = match stats.data.with(|data| overview(stats.loading.get(), data.as_ref())) {
                        Overview::Loading => {
                            return view! { <p class="stats-card__loading">"Loading overview..."</p> }.into_any();
                        }
                        Overview::Unavailable => {
                            return view! { <p class="stats-card__empty">"No overview data available"</p> }.into_any();
                        }
                        Overview::Ready(items) => items,
                    };
                    view! {
                        <div class="stats-card__grid">
                            {items
                                .into_iter()
                                .map(|(label, value)| {
                                    view! {
                                        <div class="stat-card">
                                            <div class="stat-card__label">{label}</div>
                                            <div class="stat-card__value">{value}</div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </div>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_items() {
        let stats = AggregateStats {
            min: 12.0,
            max: 2_500_000.0,
            sum: 48_200.0,
            avg: f64::NAN,
            count: 4,
        };
        let items = stat_items(&stats);
        assert_eq!(items[0], ("Min", "12".to_string()));
        assert_eq!(items[1], ("Max", "2.5 M".to_string()));
        assert_eq!(items[2], ("Sum", "48.2 K".to_string()));
        assert_eq!(items[3], ("Avg", "0".to_string()));
    }

    #[test]
    fn test_failed_fetch_shows_no_numbers() {
        assert_eq!(overview(false, None), Overview::Unavailable);
        assert_eq!(overview(true, None), Overview::Loading);

        let stats = AggregateStats {
            sum: 1_500.0,
            ..Default::default()
        };
        assert_eq!(overview(true, Some(&stats)), Overview::Loading);
        match overview(false, Some(&stats)) {
            Overview::Ready(items) => assert_eq!(items[2], ("Sum", "1.5 K".to_string())),
            other => panic!("unexpected {other:?}"),
        }
    }
}
