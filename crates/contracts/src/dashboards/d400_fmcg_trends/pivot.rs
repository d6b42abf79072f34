//! Reshaping of flat aggregate rows into chart tables.
//!
//! Every function here is deterministic: the same multiset of rows in any order
//! produces the same table. Categories and series are sorted, duplicate cells
//! are summed in a fixed order.

use std::collections::{BTreeMap, BTreeSet};

use super::dto::{AggregateRow, MarketShareRow};
use super::filters::GroupMode;

/// One category of a pivot (x-axis position) with a value per series
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PivotRow {
    pub label: String,
    /// Aligned with [`PivotTable::series`]; missing cells are 0
    pub values: Vec<f64>,
}

impl PivotRow {
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PivotTable {
    pub series: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// Group rows with one column per year
pub type GroupPivot = PivotTable;

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.series.is_empty()
    }

    /// Largest single cell
    pub fn max_value(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|r| r.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Largest row total, the height of the tallest stacked bar
    pub fn max_total(&self) -> f64 {
        self.rows.iter().map(PivotRow::total).fold(0.0, f64::max)
    }

    /// Values of one series across all rows
    pub fn column(&self, series_idx: usize) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| r.values.get(series_idx).copied().unwrap_or(0.0))
            .collect()
    }
}

/// Market share slice ready for the donut chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShareSlice {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
}

/// Sales value / volume stacked bars: one row per year, one series per group key
pub fn pivot_by_year(records: &[AggregateRow], mode: GroupMode) -> PivotTable {
    let cells = records.iter().filter_map(|r| {
        let year = r.year?;
        let key = r.key_for(mode)?;
        Some((year, key.to_string(), r.value))
    });
    build(cells, |year| year.to_string())
}

/// Yearly sales grouped bars: one row per group key, one series per year
pub fn pivot_by_group(records: &[AggregateRow], mode: GroupMode) -> GroupPivot {
    let cells = records.iter().filter_map(|r| {
        let year = r.year?;
        let key = r.key_for(mode)?;
        Some((key.to_string(), year.to_string(), r.value))
    });
    build(cells, |key| key)
}

/// Monthly trend lines keyed by `YYYY-MM`
pub fn pivot_trend(records: &[AggregateRow], mode: GroupMode) -> PivotTable {
    let cells = records.iter().filter_map(|r| {
        let year = r.year?;
        let month = r.month?;
        let key = r.key_for(mode)?;
        Some((period_key(year, month), key.to_string(), r.value))
    });
    build(cells, |period| period)
}

pub fn period_key(year: i32, month: i32) -> String {
    format!("{year:04}-{month:02}")
}

/// Drops rows without a key, merges duplicates, sorts by key and replaces
/// non-finite numbers with 0
pub fn normalize_share(rows: &[MarketShareRow], mode: GroupMode) -> Vec<ShareSlice> {
    let mut merged: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for r in rows {
        let Some(key) = r.row.key_for(mode) else {
            continue;
        };
        let entry = merged.entry(key.to_string()).or_default();
        entry.0.push(finite_or_zero(r.row.value));
        entry.1.push(finite_or_zero(r.percentage));
    }
    merged
        .into_iter()
        .map(|(label, (values, percentages))| ShareSlice {
            label,
            value: stable_sum(values),
            percentage: stable_sum(percentages),
        })
        .collect()
}

fn build<C, F>(cells: impl Iterator<Item = (C, String, f64)>, label: F) -> PivotTable
where
    C: Ord,
    F: Fn(C) -> String,
{
    let mut grid: BTreeMap<C, BTreeMap<String, Vec<f64>>> = BTreeMap::new();
    let mut series: BTreeSet<String> = BTreeSet::new();

    for (category, key, value) in cells {
        series.insert(key.clone());
        grid.entry(category)
            .or_default()
            .entry(key)
            .or_default()
            .push(finite_or_zero(value));
    }

    let series: Vec<String> = series.into_iter().collect();
    let rows = grid
        .into_iter()
        .map(|(category, mut cells)| PivotRow {
            label: label(category),
            values: series
                .iter()
                .map(|s| cells.remove(s).map(stable_sum).unwrap_or(0.0))
                .collect(),
        })
        .collect();

    PivotTable { series, rows }
}

fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, month: Option<i32>, brand: &str, value: f64) -> AggregateRow {
        AggregateRow {
            year: Some(year),
            month,
            brand: Some(brand.to_string()),
            value,
            ..Default::default()
        }
    }

    fn sample() -> Vec<AggregateRow> {
        vec![
            row(2023, None, "Brand 2", 5.0),
            row(2022, None, "Brand 1", 10.0),
            row(2023, None, "Brand 1", 7.5),
            AggregateRow {
                year: Some(2022),
                value: 99.0,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_pivot_by_year() {
        let t = pivot_by_year(&sample(), GroupMode::Brand);
        assert_eq!(t.series, vec!["Brand 1", "Brand 2"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0].label, "2022");
        assert_eq!(t.rows[0].values, vec![10.0, 0.0]);
        assert_eq!(t.rows[1].values, vec![7.5, 5.0]);
        assert_eq!(t.max_total(), 12.5);
    }

    #[test]
    fn test_pivot_by_group() {
        let t = pivot_by_group(&sample(), GroupMode::Brand);
        assert_eq!(t.series, vec!["2022", "2023"]);
        assert_eq!(t.rows[0].label, "Brand 1");
        assert_eq!(t.rows[0].values, vec![10.0, 7.5]);
        assert_eq!(t.rows[1].values, vec![0.0, 5.0]);
        assert_eq!(t.column(1), vec![7.5, 5.0]);
    }

    #[test]
    fn test_pivot_is_order_independent() {
        let mut records = sample();
        records.push(row(2023, None, "Brand 2", 0.1));
        let first = pivot_by_year(&records, GroupMode::Brand);
        records.reverse();
        assert_eq!(pivot_by_year(&records, GroupMode::Brand), first);
        assert_eq!(pivot_by_year(&records, GroupMode::Brand), first);
    }

    #[test]
    fn test_pivot_trend_zero_fills() {
        let records = vec![
            row(2023, Some(2), "Brand 1", 3.0),
            row(2022, Some(11), "Brand 2", 4.0),
            row(2023, Some(2), "Brand 2", 1.0),
            row(2023, None, "Brand 1", 50.0),
        ];
        let t = pivot_trend(&records, GroupMode::Brand);
        let labels: Vec<_> = t.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["2022-11", "2023-02"]);
        assert_eq!(t.rows[0].values, vec![0.0, 4.0]);
        assert_eq!(t.rows[1].values, vec![3.0, 1.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(pivot_by_year(&[], GroupMode::Brand).is_empty());
        assert!(pivot_by_group(&[], GroupMode::Ppg).is_empty());
        assert!(pivot_trend(&[], GroupMode::Channel).is_empty());
        assert!(normalize_share(&[], GroupMode::Brand).is_empty());
        // rows exist but none carries the series key
        assert!(pivot_by_year(&sample(), GroupMode::Ppg).is_empty());
    }

    #[test]
    fn test_normalize_share() {
        let share = |ppg: Option<&str>, value: f64, pct: f64| MarketShareRow {
            row: AggregateRow {
                ppg: ppg.map(str::to_string),
                value,
                ..Default::default()
            },
            percentage: pct,
        };
        let rows = vec![
            share(Some("Others"), 30.0, 30.0),
            share(Some("Small Multi"), 70.0, f64::NAN),
            share(None, 5.0, 5.0),
        ];
        let slices = normalize_share(&rows, GroupMode::Ppg);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Others");
        assert_eq!(slices[1].label, "Small Multi");
        assert_eq!(slices[1].percentage, 0.0);
    }
}
