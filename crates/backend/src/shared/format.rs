/// Response size for the request log: `512 B`, `1.5 KB`, `2.3 MB`
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Rounds to two decimals, the precision of every aggregate the API returns
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
