use contracts::dashboards::d400_fmcg_trends::pivot::PivotTable;
use contracts::shared::number_format::{format_compact, format_millions};
use leptos::prelude::*;

use super::geometry::{color, coord, nice_max, scale, ticks, Frame};
use super::{empty_state, EmptyChart, Legend};

const FRAME: Frame = Frame {
    width: 600.0,
    height: 280.0,
    left: 56.0,
    right: 16.0,
    top: 12.0,
    bottom: 40.0,
};

/// Vertical bars: one cluster per row, one bar per series inside it
#[component]
pub fn GroupedBarChart(table: PivotTable, empty_message: &'static str) -> impl IntoView {
    if let Some(message) = empty_state(&table, empty_message) {
        return view! { <EmptyChart message=message /> }.into_any();
    }

    let max = nice_max(table.max_value());
    let (inner_w, inner_h) = (FRAME.inner_width(), FRAME.inner_height());
    let band = inner_w / table.rows.len() as f64;
    let bar_w = band * 0.8 / table.series.len() as f64;
    let baseline = FRAME.top + inner_h;

    let grid = ticks(max, 4)
        .into_iter()
        .map(|t| {
            let y = baseline - scale(t, max, inner_h);
            view! {
                <g class="chart-grid">
                    <line
                        x1=coord(FRAME.left)
                        y1=coord(y)
                        x2=coord(FRAME.left + inner_w)
                        y2=coord(y)
                        stroke="#e5e7eb"
                        stroke-dasharray="3 3"
                    />
                    <text
                        x=coord(FRAME.left - 8.0)
                        y=coord(y)
                        text-anchor="end"
                        dominant-baseline="middle"
                        font-size="12"
                        fill="#6b7280"
                    >
                        {format_compact(t)}
                    </text>
                </g>
            }
        })
        .collect_view();

    let clusters = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let band_x = FRAME.left + band * i as f64 + band * 0.1;
            let bars = row
                .values
                .iter()
                .enumerate()
                .map(|(s, value)| {
                    let h = scale(*value, max, inner_h);
                    let tooltip = format!(
                        "{} {}: {}",
                        row.label,
                        table.series[s],
                        format_millions(*value, 1)
                    );
                    view! {
                        <rect
                            x=coord(band_x + bar_w * s as f64)
                            y=coord(baseline - h)
                            width=coord((bar_w - 2.0).max(1.0))
                            height=coord(h)
                            rx="2"
                            fill=color(s)
                        >
                            <title>{tooltip}</title>
                        </rect>
                    }
                })
                .collect_view();
            view! {
                <g class="chart-bar">
                    {bars}
                    <text
                        x=coord(FRAME.left + band * (i as f64 + 0.5))
                        y=coord(baseline + 18.0)
                        text-anchor="middle"
                        font-size="12"
                        fill="#6b7280"
                    >
                        {row.label.clone()}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <div class="chart">
            <svg class="chart-svg" viewBox=FRAME.view_box() preserveAspectRatio="xMidYMid meet">
                {grid}
                {clusters}
            </svg>
            <Legend labels=table.series.clone() />
        </div>
    }
    .into_any()
}
