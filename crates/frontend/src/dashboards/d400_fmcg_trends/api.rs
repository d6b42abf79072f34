//! Calls to the `/api/fmcg` endpoints. Each function turns the applied filter
//! state into a query string and decodes the JSON answer.

use contracts::dashboards::d400_fmcg_trends::{
    aggregate_query, aggregate_stats_query, market_share_query, trend_query, AggregateRow,
    AggregateStats, Filters, MarketShareRow, Metric,
};

use crate::shared::api_utils::{get_json, ApiError};

const BASE_URL: &str = "/api/fmcg";

async fn get<T: serde::de::DeserializeOwned>(endpoint: &str, query: String) -> Result<T, ApiError> {
    get_json(&format!("{}{}?{}", BASE_URL, endpoint, query)).await
}

/// Sales value per year and group
pub async fn fetch_sales_value(filters: &Filters) -> Result<Vec<AggregateRow>, ApiError> {
    get("/sales-value", aggregate_query(Metric::Sales, filters)).await
}

/// Volume per year and group
pub async fn fetch_volume_contribution(filters: &Filters) -> Result<Vec<AggregateRow>, ApiError> {
    get("/volume-contribution", aggregate_query(Metric::Volume, filters)).await
}

pub async fn fetch_yearly_sales(
    metric: Metric,
    filters: &Filters,
) -> Result<Vec<AggregateRow>, ApiError> {
    get("/yearly-sales", aggregate_query(metric, filters)).await
}

/// Monthly series; rows carry year, month and the group key
pub async fn fetch_sales_trend(
    metric: Metric,
    filters: &Filters,
) -> Result<Vec<AggregateRow>, ApiError> {
    get("/trend", trend_query(metric, filters)).await
}

/// Share per brand (or ppg) over all years
pub async fn fetch_market_share(
    metric: Metric,
    filters: &Filters,
) -> Result<Vec<MarketShareRow>, ApiError> {
    get("/market-share", market_share_query(metric, filters)).await
}

pub async fn fetch_aggregate_stats(
    metric: Metric,
    filters: &Filters,
) -> Result<AggregateStats, ApiError> {
    get("/aggregate-stats", aggregate_stats_query(metric, filters)).await
}
