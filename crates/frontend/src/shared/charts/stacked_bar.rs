use contracts::dashboards::d400_fmcg_trends::pivot::PivotTable;
use contracts::shared::number_format::{format_compact, format_millions};
use leptos::prelude::*;

use super::geometry::{band_center, color, coord, nice_max, scale, ticks, Frame};
use super::{empty_state, EmptyChart, Legend};

const FRAME: Frame = Frame {
    width: 600.0,
    height: 260.0,
    left: 56.0,
    right: 20.0,
    top: 10.0,
    bottom: 28.0,
};

/// Horizontal bars, one per row, stacked by series
#[component]
pub fn StackedBarChart(table: PivotTable, empty_message: &'static str) -> impl IntoView {
    if let Some(message) = empty_state(&table, empty_message) {
        return view! { <EmptyChart message=message /> }.into_any();
    }

    let max = nice_max(table.max_total());
    let (inner_w, inner_h) = (FRAME.inner_width(), FRAME.inner_height());
    let bar_h = inner_h / table.rows.len() as f64 * 0.6;

    let grid = ticks(max, 4)
        .into_iter()
        .map(|t| {
            let x = FRAME.left + scale(t, max, inner_w);
            view! {
                <g class="chart-grid">
                    <line
                        x1=coord(x)
                        y1=coord(FRAME.top)
                        x2=coord(x)
                        y2=coord(FRAME.top + inner_h)
                        stroke="#e5e7eb"
                        stroke-dasharray="3 3"
                    />
                    <text
                        x=coord(x)
                        y=coord(FRAME.height - 8.0)
                        text-anchor="middle"
                        font-size="12"
                        fill="#6b7280"
                    >
                        {format_compact(t)}
                    </text>
                </g>
            }
        })
        .collect_view();

    let rows = table.rows.len();
    let bars = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let y = FRAME.top + band_center(i, rows, inner_h) - bar_h / 2.0;
            let mut x = FRAME.left;
            let segments = row
                .values
                .iter()
                .enumerate()
                .map(|(s, value)| {
                    let w = scale(*value, max, inner_w);
                    let tooltip = format!("{}: {}", table.series[s], format_millions(*value, 1));
                    let segment = view! {
                        <rect
                            x=coord(x)
                            y=coord(y)
                            width=coord(w)
                            height=coord(bar_h)
                            fill=color(s)
                        >
                            <title>{tooltip}</title>
                        </rect>
                    };
                    x += w;
                    segment
                })
                .collect_view();
            view! {
                <g class="chart-bar">
                    <text
                        x=coord(FRAME.left - 8.0)
                        y=coord(y + bar_h / 2.0)
                        text-anchor="end"
                        dominant-baseline="middle"
                        font-size="12"
                        fill="#6b7280"
                    >
                        {row.label.clone()}
                    </text>
                    {segments}
                </g>
            }
        })
        .collect_view();

    view! {
        <div class="chart">
            <svg class="chart-svg" viewBox=FRAME.view_box() preserveAspectRatio="xMidYMid meet">
                {grid}
                {bars}
            </svg>
            <Legend labels=table.series.clone() />
        </div>
    }
    .into_any()
}
