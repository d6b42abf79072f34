use leptos::prelude::*;

use super::geometry::color;

/// Series names with their palette colour, in series order
#[component]
pub fn Legend(labels: Vec<String>) -> impl IntoView {
    view! {
        <ul class="chart-legend">
            {labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| {
                    view! {
                        <li class="chart-legend__item">
                            <span
                                class="chart-legend__swatch"
                                style=format!("background-color: {};", color(i))
                            ></span>
                            {label}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
