use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Row id of `fmcg_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FmcgRecordId(pub i64);

impl FmcgRecordId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

// ============================================================================
// Record
// ============================================================================

/// One weekly sales observation of a product variant in a channel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FmcgRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FmcgRecordId>,

    pub market: Option<String>,
    pub channel: Option<String>,
    pub region: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub brand: Option<String>,
    pub variant: Option<String>,
    pub pack_type: Option<String>,
    pub ppg: Option<String>,
    pub pack_size: Option<String>,

    pub year: Option<i32>,
    pub month: Option<i32>,
    pub week: Option<i32>,
    pub date: Option<NaiveDate>,
    pub br_cat_id: Option<String>,

    #[serde(default)]
    pub sales_value: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub volume_units: f64,
}

impl FmcgRecord {
    /// A record is usable only when every dimension the dashboard filters
    /// or groups on is present
    pub fn validate(&self) -> Result<(), String> {
        let text = [
            ("brand", &self.brand),
            ("pack_type", &self.pack_type),
            ("ppg", &self.ppg),
            ("channel", &self.channel),
        ];
        for (name, value) in text {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                return Err(format!("{name} is missing"));
            }
        }
        match self.year {
            None => return Err("year is missing".into()),
            Some(y) if y <= 0 => return Err(format!("year {y} is out of range")),
            _ => {}
        }
        match self.month {
            None => return Err("month is missing".into()),
            Some(m) if !(1..=12).contains(&m) => return Err(format!("month {m} is out of range")),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> FmcgRecord {
        FmcgRecord {
            brand: Some("Brand 1".into()),
            pack_type: Some("Small".into()),
            ppg: Some("Small Single".into()),
            channel: Some("Tesco".into()),
            year: Some(2023),
            month: Some(4),
            sales_value: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate() {
        assert!(complete().validate().is_ok());

        let mut r = complete();
        r.ppg = Some(" ".into());
        assert_eq!(r.validate().unwrap_err(), "ppg is missing");

        let mut r = complete();
        r.month = Some(13);
        assert!(r.validate().is_err());

        let mut r = complete();
        r.year = None;
        assert_eq!(r.validate().unwrap_err(), "year is missing");
    }
}
