//! SVG charts drawn directly by Leptos views.

pub mod donut;
pub mod geometry;
pub mod grouped_bar;
pub mod legend;
pub mod line_chart;
pub mod stacked_bar;

pub use donut::DonutChart;
pub use grouped_bar::GroupedBarChart;
pub use legend::Legend;
pub use line_chart::LineChart;
pub use stacked_bar::StackedBarChart;

use contracts::dashboards::d400_fmcg_trends::pivot::{PivotTable, ShareSlice};
use leptos::prelude::*;

/// Input a chart can draw from
pub trait ChartData {
    fn has_data(&self) -> bool;
}

impl ChartData for PivotTable {
    fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

/// A donut needs at least one slice with a positive value
impl ChartData for [ShareSlice] {
    fn has_data(&self) -> bool {
        self.iter().any(|s| s.value > 0.0)
    }
}

/// Message to render instead of the chart, if there is nothing to draw
pub fn empty_state<D: ChartData + ?Sized>(data: &D, message: &'static str) -> Option<&'static str> {
    (!data.has_data()).then_some(message)
}

/// Shown in place of a chart that has nothing to draw
#[component]
pub fn EmptyChart(message: &'static str) -> impl IntoView {
    view! { <div class="chart-empty">{message}</div> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_fmcg_trends::pivot::{
        normalize_share, pivot_by_group, pivot_by_year, pivot_trend,
    };
    use contracts::dashboards::d400_fmcg_trends::{AggregateRow, GroupMode, MarketShareRow};

    const EMPTY: &str = "No data";

    #[test]
    fn test_zero_records_render_empty_message() {
        for mode in [GroupMode::Brand, GroupMode::Ppg, GroupMode::Channel] {
            assert_eq!(empty_state(&pivot_by_year(&[], mode), EMPTY), Some(EMPTY));
            assert_eq!(empty_state(&pivot_by_group(&[], mode), EMPTY), Some(EMPTY));
            assert_eq!(empty_state(&pivot_trend(&[], mode), EMPTY), Some(EMPTY));
            assert_eq!(empty_state(normalize_share(&[], mode).as_slice(), EMPTY), Some(EMPTY));
        }
    }

    #[test]
    fn test_rows_without_group_key_render_empty_message() {
        let row = AggregateRow {
            year: Some(2023),
            month: Some(4),
            value: 10.0,
            ..Default::default()
        };
        let rows = vec![row.clone()];
        assert_eq!(empty_state(&pivot_by_year(&rows, GroupMode::Brand), EMPTY), Some(EMPTY));
        assert_eq!(empty_state(&pivot_trend(&rows, GroupMode::Ppg), EMPTY), Some(EMPTY));

        let shares = vec![MarketShareRow { row, percentage: 100.0 }];
        assert_eq!(
            empty_state(normalize_share(&shares, GroupMode::Brand).as_slice(), EMPTY),
            Some(EMPTY)
        );
    }

    #[test]
    fn test_data_is_drawn() {
        let row = AggregateRow {
            year: Some(2023),
            brand: Some("Brand 1".into()),
            value: 10.0,
            ..Default::default()
        };
        let table = pivot_by_year(std::slice::from_ref(&row), GroupMode::Brand);
        assert_eq!(empty_state(&table, EMPTY), None);

        let zero = MarketShareRow {
            row: AggregateRow { value: 0.0, ..row.clone() },
            percentage: 0.0,
        };
        let live = MarketShareRow { row, percentage: 100.0 };
        assert_eq!(
            empty_state(normalize_share(&[zero.clone()], GroupMode::Brand).as_slice(), EMPTY),
            Some(EMPTY)
        );
        assert_eq!(
            empty_state(normalize_share(&[zero, live], GroupMode::Brand).as_slice(), EMPTY),
            None
        );
    }
}
