//! Data tabs and the multi-select filters.
//!
//! Selections are edited in a pending copy; "Apply" replaces the applied
//! filters wholesale, "Reset" and tab changes go back to the tab default.

use contracts::dashboards::d400_fmcg_trends::{DataTab, FilterDimension, Filters};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};

/// Order of the selects in the bar
const DIMENSIONS: [FilterDimension; 5] = [
    FilterDimension::Channel,
    FilterDimension::Brand,
    FilterDimension::PackType,
    FilterDimension::Ppg,
    FilterDimension::Year,
];

/// Button text of a multi-select
fn selection_label(selected: &[String], options: &[String]) -> String {
    match selected {
        [] => "All".to_string(),
        _ if selected.len() == options.len() => "All".to_string(),
        [single] => single.clone(),
        _ => format!("{} selected", selected.len()),
    }
}

fn toggled(selected: &[String], option: &str) -> Vec<String> {
    if selected.iter().any(|s| s == option) {
        selected.iter().filter(|s| *s != option).cloned().collect()
    } else {
        let mut out = selected.to_vec();
        out.push(option.to_string());
        out
    }
}

#[component]
fn MultiSelect(
    label: &'static str,
    options: Vec<String>,
    #[prop(into)] value: Signal<Vec<String>>,
    #[prop(into)] on_change: Callback<Vec<String>>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let options = StoredValue::new(options);

    view! {
        <div class="filter-select">
            <label class="filter-select__label">{label}</label>
            <div
                class="filter-select__control"
                on:mouseenter=move |_| set_open.set(true)
                on:mouseleave=move |_| set_open.set(false)
            >
                <button type="button" class="filter-select__button" aria-expanded=move || open.get().to_string()>
                    <span>{move || options.with_value(|o| selection_label(&value.get(), o))}</span>
                    <span class="filter-select__chevron">"▾"</span>
                </button>
                <div class=move || {
                    if open.get() { "filter-select__menu filter-select__menu--open" } else { "filter-select__menu" }
                }>
                    <div class="filter-select__actions">
                        <button type="button" on:click=move |_| on_change.run(options.get_value())>
                            "Select All"
                        </button>
                        <button type="button" on:click=move |_| on_change.run(Vec::new())>
                            "Clear"
                        </button>
                    </div>
                    {options
                        .get_value()
                        .into_iter()
                        .map(|option| {
                            let key = option.clone();
                            let active = move || value.with(|v| v.contains(&key));
                            let active_class = active.clone();
                            let clicked = option.clone();
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if active_class() { "filter-select__option filter-select__option--active" } else { "filter-select__option" }
                                    }
                                    on:click=move |_| on_change.run(toggled(&value.get_untracked(), &clicked))
                                >
                                    <input type="checkbox" readonly prop:checked=active />
                                    {option}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn FilterBar(tab: RwSignal<DataTab>, filters: RwSignal<Filters>) -> impl IntoView {
    let pending = RwSignal::new(filters.get_untracked());

    let reset = move || {
        let cleared = Filters::for_tab(tab.get_untracked());
        pending.set(cleared.clone());
        filters.set(cleared);
    };

    let apply = move |_| {
        let mut updated = pending.get_untracked().normalized();
        updated.group_mode = Some(tab.get_untracked().group_mode());
        filters.set(updated);
    };

    view! {
        <div class="filter-bar">
            <div class="filter-bar__tabs">
                {DataTab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                type="button"
                                class=move || {
                                    if tab.get() == t { "filter-bar__tab filter-bar__tab--active" } else { "filter-bar__tab" }
                                }
                                on:click=move |_| {
                                    if tab.get_untracked() != t {
                                        tab.set(t);
                                        reset();
                                    }
                                }
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="filter-bar__selects">
                {DIMENSIONS
                    .into_iter()
                    .map(|dim| {
                        view! {
                            <MultiSelect
                                label=dim.label()
                                options=dim.options()
                                value=Signal::derive(move || pending.with(|p| p.values(dim).to_vec()))
                                on_change={move |values: Vec<String>| pending.update(|p| p.set_values(dim, values))}
                            />
                        }
                    })
                    .collect_view()}

                <div class="filter-bar__buttons">
                    <Show when=move || pending.with(|p| p.normalized().active_count() > 0)>
                        <span class="filter-bar__count">
                            {move || format!("{} filtered", pending.with(|p| p.normalized().active_count()))}
                        </span>
                    </Show>
                    <Button appearance=ButtonAppearance::Primary on_click=apply>
                        "Apply"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| reset()>
                        "Reset"
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_selection_label() {
        let options = strings(&["Small", "Medium", "Large"]);
        assert_eq!(selection_label(&[], &options), "All");
        assert_eq!(selection_label(&options, &options), "All");
        assert_eq!(selection_label(&strings(&["Medium"]), &options), "Medium");
        assert_eq!(selection_label(&strings(&["Small", "Large"]), &options), "2 selected");
    }

    #[test]
    fn test_toggled() {
        let selected = strings(&["Brand 1", "Brand 3"]);
        assert_eq!(toggled(&selected, "Brand 1"), strings(&["Brand 3"]));
        assert_eq!(toggled(&selected, "Brand 2"), strings(&["Brand 1", "Brand 3", "Brand 2"]));
    }
}
