//! Query-string composition for the `/api/fmcg` endpoints and its server-side parser.
//!
//! Multi-valued filters travel as repeated keys (`brand=A&brand=B`), grouping as
//! repeated `group_by` keys in significance order.

use super::filters::{FilterDimension, Filters, Metric, ALL_SENTINEL};

struct QueryWriter {
    pairs: Vec<String>,
}

impl QueryWriter {
    fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    fn push(&mut self, key: &str, value: &str) {
        self.pairs.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(value)
        ));
    }

    fn push_filters(&mut self, filters: &Filters) {
        let filters = filters.normalized();
        for dim in FilterDimension::ALL {
            for value in filters.values(dim) {
                self.push(dim.key(), value);
            }
        }
    }

    fn finish(self) -> String {
        self.pairs.join("&")
    }
}

/// Filter pairs followed by `group_by=year` (optional) and `group_by=<group mode>`
pub fn build_query(filters: &Filters, include_year_grouping: bool) -> String {
    let mut w = QueryWriter::new();
    w.push_filters(filters);
    if include_year_grouping {
        w.push("group_by", "year");
    }
    w.push("group_by", filters.effective_group_mode().key());
    w.finish()
}

/// Year x group-mode aggregate (sales value, volume contribution, yearly sales charts)
pub fn aggregate_query(metric: Metric, filters: &Filters) -> String {
    format!("metric={}&{}", metric.key(), build_query(filters, true))
}

/// Overview statistics take filters only
pub fn aggregate_stats_query(metric: Metric, filters: &Filters) -> String {
    let mut w = QueryWriter::new();
    w.push("metric", metric.key());
    w.push_filters(filters);
    w.finish()
}

/// Monthly trend: year, month, then the series dimension
pub fn trend_query(metric: Metric, filters: &Filters) -> String {
    let mut w = QueryWriter::new();
    w.push("metric", metric.key());
    w.push("group_by", "year");
    w.push("group_by", "month");
    w.push("group_by", filters.effective_group_mode().key());
    w.push_filters(filters);
    w.finish()
}

/// Market share ignores the year filter and only splits by ppg or brand
pub fn market_share_query(metric: Metric, filters: &Filters) -> String {
    let group = filters.effective_group_mode().market_share_group();
    let mut w = QueryWriter::new();
    w.push("metric", metric.key());
    w.push("group_by", group.key());
    w.push_filters(&filters.without_year());
    w.finish()
}

/// Parsed form of an incoming `/api/fmcg/*` query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FmcgQuery {
    pub filters: Filters,
    pub group_by: Vec<String>,
    pub metric: Metric,
}

impl FmcgQuery {
    pub fn parse(raw: &str) -> Self {
        let mut out = FmcgQuery::default();
        for pair in raw.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            let value = decode_component(value);
            let value = value.trim();

            match key.as_str() {
                "metric" => out.metric = Metric::from_key(value),
                "group_by" => {
                    if !value.is_empty() {
                        out.group_by.push(value.to_string());
                    }
                }
                other => {
                    let Some(dim) = FilterDimension::from_key(other) else {
                        continue;
                    };
                    if value.is_empty() || value == ALL_SENTINEL {
                        continue;
                    }
                    if dim == FilterDimension::Year && value.parse::<i32>().is_err() {
                        continue;
                    }
                    let mut values = out.filters.values(dim).to_vec();
                    if !values.iter().any(|v| v == value) {
                        values.push(value.to_string());
                    }
                    out.filters.set_values(dim, values);
                }
            }
        }
        out
    }

    /// Year filter as integers
    pub fn years(&self) -> Vec<i32> {
        self.filters
            .year
            .iter()
            .filter_map(|y| y.parse().ok())
            .collect()
    }
}

fn decode_component(s: &str) -> String {
    let plus_as_space = s.replace('+', " ");
    urlencoding::decode(&plus_as_space)
        .map(|c| c.into_owned())
        .unwrap_or(plus_as_space)
}
