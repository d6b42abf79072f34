use contracts::dashboards::d400_fmcg_trends::pivot::PivotTable;
use contracts::shared::number_format::{
    format_compact, format_millions, format_period_label, format_period_long,
};
use leptos::prelude::*;

use super::geometry::{band_center, color, coord, line_path, nice_max, scale, ticks, Frame};
use super::{empty_state, EmptyChart, Legend};

const FRAME: Frame = Frame {
    width: 640.0,
    height: 300.0,
    left: 56.0,
    right: 24.0,
    top: 24.0,
    bottom: 36.0,
};

/// Most x-axis labels shown before thinning out
const MAX_X_LABELS: usize = 12;

/// One line per series over `YYYY-MM` rows
#[component]
pub fn LineChart(table: PivotTable, empty_message: &'static str) -> impl IntoView {
    if let Some(message) = empty_state(&table, empty_message) {
        return view! { <EmptyChart message=message /> }.into_any();
    }

    let max = nice_max(table.max_value());
    let (inner_w, inner_h) = (FRAME.inner_width(), FRAME.inner_height());
    let baseline = FRAME.top + inner_h;
    let n = table.rows.len();
    let x_at = move |i: usize| FRAME.left + band_center(i, n, inner_w);
    let y_at = move |v: f64| baseline - scale(v, max, inner_h);
    let label_step = n.div_ceil(MAX_X_LABELS).max(1);

    let grid = ticks(max, 4)
        .into_iter()
        .map(|t| {
            let y = y_at(t);
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

    let x_labels = table
        .rows
        .iter()
        .enumerate()
        .filter(|(i, _)| i % label_step == 0)
        .map(|(i, row)| {
            view! {
                <text
                    x=coord(x_at(i))
                    y=coord(baseline + 20.0)
                    text-anchor="middle"
                    font-size="12"
                    fill="#6b7280"
                >
                    {format_period_label(&row.label)}
                </text>
            }
        })
        .collect_view();

    let lines = table
        .series
        .iter()
        .enumerate()
        .map(|(s, name)| {
            let values = table.column(s);
            let points: Vec<(f64, f64)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (x_at(i), y_at(*v)))
                .collect();
            let dots = points
                .iter()
                .zip(table.rows.iter().zip(values.iter()))
                .map(|((x, y), (row, value))| {
                    let tooltip = format!(
                        "{} | {}: {}",
                        format_period_long(&row.label),
                        name,
                        format_millions(*value, 1)
                    );
                    view! {
                        <circle cx=coord(*x) cy=coord(*y) r="3" fill=color(s) class="chart-point">
                            <title>{tooltip}</title>
                        </circle>
                    }
                })
                .collect_view();
            view! {
                <g class="chart-series">
                    <path
                        d=line_path(&points)
                        fill="none"
                        stroke=color(s)
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    />
                    {dots}
                </g>
            }
        })
        .collect_view();

    view! {
        <div class="chart">
            <svg class="chart-svg" viewBox=FRAME.view_box() preserveAspectRatio="xMidYMid meet">
                {grid}
                {x_labels}
                {lines}
            </svg>
            <Legend labels=table.series.clone() />
        </div>
    }
    .into_any()
}
