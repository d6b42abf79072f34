use contracts::dashboards::d400_fmcg_trends::pivot::ShareSlice;
use contracts::shared::number_format::format_millions;
use leptos::prelude::*;

use super::geometry::{arc_path, color, coord, label_point, slice_angles};
use super::{empty_state, EmptyChart};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const OUTER: f64 = 120.0;
const INNER: f64 = 70.0;
const LABEL_OFFSET: f64 = 24.0;

/// Donut with outer value labels, the total in the middle and a share legend
#[component]
pub fn DonutChart(slices: Vec<ShareSlice>, empty_message: &'static str) -> impl IntoView {
    if let Some(message) = empty_state(slices.as_slice(), empty_message) {
        return view! { <EmptyChart message=message /> }.into_any();
    }

    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0);
    let total: f64 = slices.iter().map(|s| s.value).sum();
    let values: Vec<f64> = slices.iter().map(|s| s.value).collect();
    let angles = slice_angles(&values);

    let segments = slices
        .iter()
        .zip(angles.iter())
        .enumerate()
        .filter(|(_, (_, (start, end)))| end > start)
        .map(|(i, (slice, (start, end)))| {
            let (lx, ly) = label_point(cx, cy, OUTER + LABEL_OFFSET, *start, *end);
            let anchor = if lx >= cx { "start" } else { "end" };
            let caption = format!(
                "{} ({:.1}%)",
                format_millions(slice.value, 2),
                slice.percentage
            );
            let tooltip = format!("{}: {}", slice.label, caption);
            view! {
                <g class="chart-slice">
                    <path
                        d=arc_path(cx, cy, OUTER, INNER, *start, *end)
                        fill=color(i)
                        stroke="#ffffff"
                        stroke-width="2"
                    >
                        <title>{tooltip}</title>
                    </path>
                    <text
                        x=coord(lx)
                        y=coord(ly)
                        text-anchor=anchor
                        dominant-baseline="central"
                        font-size="11"
                        fill="#374151"
                    >
                        {caption}
                    </text>
                </g>
            }
        })
        .collect_view();

    let legend = slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            view! {
                <li class="chart-legend__item">
                    <span
                        class="chart-legend__swatch"
                        style=format!("background-color: {};", color(i))
                    ></span>
                    {format!("{}: {:.1}%", slice.label, slice.percentage)}
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="chart">
            <svg
                class="chart-svg"
                viewBox=format!("0 0 {} {}", WIDTH, HEIGHT)
                preserveAspectRatio="xMidYMid meet"
            >
                {segments}
                <text
                    x=coord(cx)
                    y=coord(cy - 6.0)
                    text-anchor="middle"
                    font-size="14"
                    font-weight="700"
                    fill="#111827"
                >
                    {format_millions(total, 2)}
                </text>
                <text x=coord(cx) y=coord(cy + 14.0) text-anchor="middle" font-size="12" fill="#6b7280">
                    "Total"
                </text>
            </svg>
            <ul class="chart-legend">{legend}</ul>
        </div>
    }
    .into_any()
}
