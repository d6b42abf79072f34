use serde::{Deserialize, Serialize};

/// Value the multi-select shows when nothing narrows the dimension.
/// It must never reach the wire.
pub const ALL_SENTINEL: &str = "All";

pub const CHANNELS: &[&str] = &["Supermarkets", "Tesco", "Convenience", "Iceland"];
pub const BRANDS: &[&str] = &["Brand 1", "Brand 2", "Brand 3", "Brand 4", "Brand 5", "Brand 6"];
pub const PACK_TYPES: &[&str] = &["Small", "Medium", "Large"];
pub const PPGS: &[&str] = &[
    "Small Single",
    "Small Multi",
    "Small SNAP POTS",
    "Standard Single",
    "Standard Multi",
    "Others",
];
pub const YEARS: &[i32] = &[2021, 2022, 2023, 2024];

/// Filterable dimension of the `fmcg_data` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Brand,
    Year,
    PackType,
    Ppg,
    Channel,
}

impl FilterDimension {
    /// Wire order used when composing query strings
    pub const ALL: [FilterDimension; 5] = [
        FilterDimension::Brand,
        FilterDimension::Year,
        FilterDimension::PackType,
        FilterDimension::Ppg,
        FilterDimension::Channel,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterDimension::Brand => "brand",
            FilterDimension::Year => "year",
            FilterDimension::PackType => "pack_type",
            FilterDimension::Ppg => "ppg",
            FilterDimension::Channel => "channel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterDimension::Brand => "Brand",
            FilterDimension::Year => "Year",
            FilterDimension::PackType => "Pack Type",
            FilterDimension::Ppg => "PPG",
            FilterDimension::Channel => "Channel",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    /// Options offered by the filter bar
    pub fn options(&self) -> Vec<String> {
        match self {
            FilterDimension::Brand => BRANDS.iter().map(|s| s.to_string()).collect(),
            FilterDimension::Year => YEARS.iter().map(|y| y.to_string()).collect(),
            FilterDimension::PackType => PACK_TYPES.iter().map(|s| s.to_string()).collect(),
            FilterDimension::Ppg => PPGS.iter().map(|s| s.to_string()).collect(),
            FilterDimension::Channel => CHANNELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Dimension used to split chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    #[default]
    Brand,
    Ppg,
    Channel,
}

impl GroupMode {
    pub fn key(&self) -> &'static str {
        match self {
            GroupMode::Brand => "brand",
            GroupMode::Ppg => "ppg",
            GroupMode::Channel => "channel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupMode::Brand => "Brand",
            GroupMode::Ppg => "PPG",
            GroupMode::Channel => "Channel",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "brand" => Some(GroupMode::Brand),
            "ppg" => Some(GroupMode::Ppg),
            "channel" => Some(GroupMode::Channel),
            _ => None,
        }
    }

    /// Market share splits by PPG in PPG mode and by brand otherwise
    pub fn market_share_group(&self) -> GroupMode {
        match self {
            GroupMode::Ppg => GroupMode::Ppg,
            _ => GroupMode::Brand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Sales,
    Volume,
}

impl Metric {
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Sales => "sales",
            Metric::Volume => "volume",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Sales => "Sales",
            Metric::Volume => "Volume",
        }
    }

    /// Column of `fmcg_data` summed for this metric
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Sales => "sales_value",
            Metric::Volume => "volume",
        }
    }

    /// Unknown values fall back to sales
    pub fn from_key(key: &str) -> Self {
        match key {
            "volume" => Metric::Volume,
            _ => Metric::Sales,
        }
    }
}

/// Tabs of the trends dashboard filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataTab {
    #[default]
    Brand,
    PackType,
    Ppg,
    BrandPackTypePpg,
    CorrelationAndTrends,
}

impl DataTab {
    pub const ALL: [DataTab; 5] = [
        DataTab::Brand,
        DataTab::PackType,
        DataTab::Ppg,
        DataTab::BrandPackTypePpg,
        DataTab::CorrelationAndTrends,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DataTab::Brand => "Brand",
            DataTab::PackType => "Pack Type",
            DataTab::Ppg => "PPG",
            DataTab::BrandPackTypePpg => "Brand X Pack Type X PPG",
            DataTab::CorrelationAndTrends => "Correlation and Trends",
        }
    }

    pub fn group_mode(&self) -> GroupMode {
        match self {
            DataTab::Ppg => GroupMode::Ppg,
            _ => GroupMode::Brand,
        }
    }

    /// Only the Brand and PPG tabs have charts; the rest show a placeholder
    pub fn shows_charts(&self) -> bool {
        matches!(self, DataTab::Brand | DataTab::Ppg)
    }
}

/// Applied (or pending) filter state of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub brand: Vec<String>,
    #[serde(default)]
    pub year: Vec<String>,
    #[serde(default)]
    pub pack_type: Vec<String>,
    #[serde(default)]
    pub ppg: Vec<String>,
    #[serde(default)]
    pub channel: Vec<String>,
    #[serde(default, rename = "groupMode", skip_serializing_if = "Option::is_none")]
    pub group_mode: Option<GroupMode>,
}

impl Filters {
    /// Cleared state for a tab: no selections, tab's group mode
    pub fn for_tab(tab: DataTab) -> Self {
        Self {
            group_mode: Some(tab.group_mode()),
            ..Self::default()
        }
    }

    pub fn values(&self, dim: FilterDimension) -> &[String] {
        match dim {
            FilterDimension::Brand => &self.brand,
            FilterDimension::Year => &self.year,
            FilterDimension::PackType => &self.pack_type,
            FilterDimension::Ppg => &self.ppg,
            FilterDimension::Channel => &self.channel,
        }
    }

    pub fn set_values(&mut self, dim: FilterDimension, values: Vec<String>) {
        let slot = match dim {
            FilterDimension::Brand => &mut self.brand,
            FilterDimension::Year => &mut self.year,
            FilterDimension::PackType => &mut self.pack_type,
            FilterDimension::Ppg => &mut self.ppg,
            FilterDimension::Channel => &mut self.channel,
        };
        *slot = values;
    }

    /// Group mode with the brand default applied
    pub fn effective_group_mode(&self) -> GroupMode {
        self.group_mode.unwrap_or_default()
    }

    /// Copy with the sentinel, blanks and duplicates removed from every dimension
    pub fn normalized(&self) -> Self {
        let mut out = Self {
            group_mode: self.group_mode,
            ..Self::default()
        };
        for dim in FilterDimension::ALL {
            out.set_values(dim, normalize_values(self.values(dim)));
        }
        out
    }

    /// Number of dimensions with at least one selected value
    pub fn active_count(&self) -> usize {
        FilterDimension::ALL
            .iter()
            .filter(|d| !normalize_values(self.values(**d)).is_empty())
            .count()
    }

    /// Same filters without the year dimension (market share ignores years)
    pub fn without_year(&self) -> Self {
        let mut out = self.clone();
        out.year.clear();
        out
    }
}

fn normalize_values(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if v.is_empty() || v == ALL_SENTINEL {
            continue;
        }
        if !out.iter().any(|existing| existing == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_group_mode() {
        assert_eq!(DataTab::Ppg.group_mode(), GroupMode::Ppg);
        assert_eq!(DataTab::Brand.group_mode(), GroupMode::Brand);
        assert_eq!(DataTab::PackType.group_mode(), GroupMode::Brand);
        assert!(DataTab::Brand.shows_charts());
        assert!(!DataTab::CorrelationAndTrends.shows_charts());
    }

    #[test]
    fn test_for_tab_is_cleared() {
        let f = Filters::for_tab(DataTab::Ppg);
        assert_eq!(f.group_mode, Some(GroupMode::Ppg));
        assert_eq!(f.active_count(), 0);
    }

    #[test]
    fn test_normalized_drops_sentinel_and_duplicates() {
        let f = Filters {
            brand: vec!["All".into(), "Brand 1".into(), " ".into(), "Brand 1".into(), "Brand 2".into()],
            year: vec!["All".into()],
            ..Filters::default()
        };
        let n = f.normalized();
        assert_eq!(n.brand, vec!["Brand 1", "Brand 2"]);
        assert!(n.year.is_empty());
        assert_eq!(f.active_count(), 1);
    }

    #[test]
    fn test_dimension_keys() {
        for dim in FilterDimension::ALL {
            assert_eq!(FilterDimension::from_key(dim.key()), Some(dim));
        }
        assert_eq!(FilterDimension::from_key("region"), None);
        assert_eq!(Metric::from_key("bogus"), Metric::Sales);
    }

    #[test]
    fn test_group_mode_serde_name() {
        let f = Filters::for_tab(DataTab::Brand);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["groupMode"], "brand");
    }
}
