use contracts::dashboards::d400_fmcg_trends::pivot::{
    normalize_share, pivot_by_group, pivot_by_year, pivot_trend, PivotTable, ShareSlice,
};
use contracts::dashboards::d400_fmcg_trends::{DataTab, Filters, Metric};
use leptos::prelude::*;

use super::aggregate_stats::AggregateStatsCard;
use super::chart_card::ChartCard;
use super::filter_bar::FilterBar;
use super::slot::ChartSlot;
use crate::dashboards::d400_fmcg_trends::api;
use crate::layout::placeholder::Placeholder;
use crate::shared::charts::{DonutChart, GroupedBarChart, LineChart, StackedBarChart};
use crate::system::auth::context::use_auth;

/// Trends page: filter bar, overview and the five charts.
///
/// Every chart reloads when the applied filters (or its own metric) change;
/// rows are pivoted once per response with the group mode of that request.
#[component]
pub fn FmcgTrendsDashboard() -> impl IntoView {
    let (_, set_auth_state) = use_auth();

    let tab = RwSignal::new(DataTab::default());
    let filters = RwSignal::new(Filters::for_tab(DataTab::default()));
    let yearly_metric = RwSignal::new(Metric::Sales);
    let trend_metric = RwSignal::new(Metric::Sales);
    let share_metric = RwSignal::new(Metric::Sales);

    let sales_value = ChartSlot::<PivotTable>::new();
    let volume = ChartSlot::<PivotTable>::new();
    let yearly = ChartSlot::<PivotTable>::new();
    let trend = ChartSlot::<PivotTable>::new();
    let market_share = ChartSlot::<Vec<ShareSlice>>::new();

    Effect::new(move |_| {
        let f = filters.get();
        let mode = f.effective_group_mode();
        sales_value.load("sales value", set_auth_state, async move {
            api::fetch_sales_value(&f)
                .await
                .map(|rows| pivot_by_year(&rows, mode))
        });
    });

    Effect::new(move |_| {
        let f = filters.get();
        let mode = f.effective_group_mode();
        volume.load("volume contribution", set_auth_state, async move {
            api::fetch_volume_contribution(&f)
                .await
                .map(|rows| pivot_by_year(&rows, mode))
        });
    });

    Effect::new(move |_| {
        let f = filters.get();
        let metric = yearly_metric.get();
        let mode = f.effective_group_mode();
        yearly.load("yearly sales", set_auth_state, async move {
            api::fetch_yearly_sales(metric, &f)
                .await
                .map(|rows| pivot_by_group(&rows, mode))
        });
    });

    Effect::new(move |_| {
        let f = filters.get();
        let metric = trend_metric.get();
        let mode = f.effective_group_mode();
        trend.load("sales trend", set_auth_state, async move {
            api::fetch_sales_trend(metric, &f)
                .await
                .map(|rows| pivot_trend(&rows, mode))
        });
    });

    Effect::new(move |_| {
        let f = filters.get();
        let metric = share_metric.get();
        let mode = f.effective_group_mode().market_share_group();
        market_share.load("market share", set_auth_state, async move {
            api::fetch_market_share(metric, &f)
                .await
                .map(|rows| normalize_share(&rows, mode))
        });
    });

    let table = move |slot: ChartSlot<PivotTable>| slot.data.get().unwrap_or_default();

    view! {
        <div class="dashboard">
            <FilterBar tab=tab filters=filters />

            <Show
                when=move || tab.get().shows_charts()
                fallback=|| view! { <Placeholder /> }
            >
                <AggregateStatsCard filters=filters />

                <div class="dashboard__grid">
                    <ChartCard title="Sales Value (EURO)" loading=sales_value.loading delay_ms=0>
                        {move || view! {
                            <StackedBarChart table=table(sales_value) empty_message="No sales data available" />
                        }}
                    </ChartCard>

                    <ChartCard title="Volume Contribution (KG)" loading=volume.loading delay_ms=80>
                        {move || view! {
                            <StackedBarChart
                                table=table(volume)
                                empty_message="No volume contribution data available"
                            />
                        }}
                    </ChartCard>

                    <ChartCard title="Yearly Sales" loading=yearly.loading metric=yearly_metric delay_ms=160>
                        {move || view! {
                            <GroupedBarChart table=table(yearly) empty_message="No yearly data" />
                        }}
                    </ChartCard>

                    <ChartCard title="Sales Trend" loading=trend.loading metric=trend_metric delay_ms=240>
                        {move || view! {
                            <LineChart table=table(trend) empty_message="No trend data" />
                        }}
                    </ChartCard>
                </div>

                <ChartCard title="Market Share" loading=market_share.loading metric=share_metric delay_ms=320>
                    {move || view! {
                        <DonutChart
                            slices=market_share.data.get().unwrap_or_default()
                            empty_message="No market share data available"
                        />
                    }}
                </ChartCard>
            </Show>
        </div>
    }
}
