use serde::{Deserialize, Serialize};

use super::filters::GroupMode;

pub use crate::domain::a001_fmcg_record::FmcgRecord;

/// One grouped aggregate returned by `/api/fmcg/aggregate` and `/api/fmcg/trend`.
///
/// Only the keys that were grouped on are present in the JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default)]
    pub value: f64,
}

impl AggregateRow {
    /// Series key of this row for the given group mode; blank keys count as missing
    pub fn key_for(&self, mode: GroupMode) -> Option<&str> {
        let key = match mode {
            GroupMode::Brand => self.brand.as_deref(),
            GroupMode::Ppg => self.ppg.as_deref(),
            GroupMode::Channel => self.channel.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    /// Sets a dimension value by its `group_by` name
    pub fn set_dimension(&mut self, name: &str, value: DimensionValue) {
        match (name, value) {
            ("year", DimensionValue::Int(v)) => self.year = v,
            ("month", DimensionValue::Int(v)) => self.month = v,
            ("brand", DimensionValue::Text(v)) => self.brand = v,
            ("ppg", DimensionValue::Text(v)) => self.ppg = v,
            ("pack_type", DimensionValue::Text(v)) => self.pack_type = v,
            ("channel", DimensionValue::Text(v)) => self.channel = v,
            _ => {}
        }
    }
}

/// Raw dimension value read from a grouped query
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValue {
    Int(Option<i32>),
    Text(Option<String>),
}

/// Market share slice returned by `/api/fmcg/market-share`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketShareRow {
    #[serde(flatten)]
    pub row: AggregateRow,
    /// Share of the total in percent, two decimals
    #[serde(default)]
    pub percentage: f64,
}

/// Overview statistics of the selected metric over all matching records
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub avg: f64,
    pub count: i64,
}

/// Result of a CSV import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_keys_are_omitted() {
        let row = AggregateRow {
            year: Some(2023),
            brand: Some("Brand 1".into()),
            value: 12.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"year":2023,"brand":"Brand 1","value":12.5}"#);
    }

    #[test]
    fn test_market_share_is_flat() {
        let json = r#"{"ppg":"Others","value":10.0,"percentage":25.0}"#;
        let row: MarketShareRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.row.key_for(GroupMode::Ppg), Some("Others"));
        assert_eq!(row.row.key_for(GroupMode::Brand), None);
        assert_eq!(row.percentage, 25.0);
    }

    #[test]
    fn test_blank_key_is_missing() {
        let row = AggregateRow {
            brand: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(row.key_for(GroupMode::Brand), None);
    }
}
