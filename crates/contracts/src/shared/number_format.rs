//! Number and period formatting shared by chart axes, tooltips and stat cards.

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `12_345_678.0, 1` -> `"12.3 M"`; non-finite values render as zero
pub fn format_millions(value: f64, decimals: usize) -> String {
    let v = if value.is_finite() { value } else { 0.0 };
    format!("{:.*} M", decimals, v / 1_000_000.0)
}

/// M / K / plain, used by the overview cards
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1} M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1} K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// `"2023-04"` -> `"Apr 23"`; anything unparsable is returned as is
pub fn format_period_label(period: &str) -> String {
    match split_period(period) {
        Some((year, month)) => format!("{} {:02}", &MONTHS[month - 1][..3], year.rem_euclid(100)),
        None => period.to_string(),
    }
}

/// `"2023-04"` -> `"April 2023"`, for tooltips
pub fn format_period_long(period: &str) -> String {
    match split_period(period) {
        Some((year, month)) => format!("{} {}", MONTHS[month - 1], year),
        None => period.to_string(),
    }
}

fn split_period(period: &str) -> Option<(i32, usize)> {
    let (y, m) = period.split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: usize = m.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}
