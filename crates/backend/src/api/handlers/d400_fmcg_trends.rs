use axum::{extract::RawQuery, Json};
use contracts::dashboards::d400_fmcg_trends::{
    AggregateRow, AggregateStats, FmcgQuery, MarketShareRow, Metric,
};

use crate::dashboards::d400_fmcg_trends::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::AppResult;

fn parse(raw: Option<String>) -> FmcgQuery {
    FmcgQuery::parse(raw.as_deref().unwrap_or_default())
}

/// GET /api/fmcg/aggregate?metric=sales&group_by=year&group_by=brand&brand=...
pub async fn aggregate(RawQuery(raw): RawQuery) -> AppResult<Json<Vec<AggregateRow>>> {
    let query = parse(raw);
    let rows = service::aggregate(get_connection(), &query).await?;
    tracing::debug!("FMCG aggregate {:?}: {} rows", query.group_by, rows.len());
    Ok(Json(rows))
}

/// GET /api/fmcg/aggregate-stats?metric=...&<filters>
pub async fn aggregate_stats(RawQuery(raw): RawQuery) -> AppResult<Json<AggregateStats>> {
    let stats = service::stats(get_connection(), &parse(raw)).await?;
    Ok(Json(stats))
}

/// GET /api/fmcg/trend
pub async fn trend(RawQuery(raw): RawQuery) -> AppResult<Json<Vec<AggregateRow>>> {
    let rows = service::trend(get_connection(), &parse(raw)).await?;
    Ok(Json(rows))
}

/// GET /api/fmcg/market-share
pub async fn market_share(RawQuery(raw): RawQuery) -> AppResult<Json<Vec<MarketShareRow>>> {
    let rows = service::market_share(get_connection(), &parse(raw)).await?;
    Ok(Json(rows))
}

/// GET /api/fmcg/sales-value (metric fixed to sales)
pub async fn sales_value(RawQuery(raw): RawQuery) -> AppResult<Json<Vec<AggregateRow>>> {
    let query = FmcgQuery {
        metric: Metric::Sales,
        ..parse(raw)
    };
    Ok(Json(service::aggregate(get_connection(), &query).await?))
}

/// GET /api/fmcg/volume-contribution (metric fixed to volume)
pub async fn volume_contribution(RawQuery(raw): RawQuery) -> AppResult<Json<Vec<AggregateRow>>> {
    let query = FmcgQuery {
        metric: Metric::Volume,
        ..parse(raw)
    };
    Ok(Json(service::aggregate(get_connection(), &query).await?))
}

/// GET /api/fmcg/yearly-sales
pub async fn yearly_sales(RawQuery(raw): RawQuery) -> AppResult<Json<Vec<AggregateRow>>> {
    Ok(Json(service::aggregate(get_connection(), &parse(raw)).await?))
}
