use axum::{extract::RawQuery, Json};
use contracts::dashboards::d400_fmcg_trends::FmcgQuery;
use contracts::domain::a001_fmcg_record::FmcgRecord;
use serde_json::{json, Value};

use crate::domain::a001_fmcg_record::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::AppResult;

/// GET /api/fmcg/records?<filters> (first 500 matches)
pub async fn list(RawQuery(raw): RawQuery) -> AppResult<Json<Vec<FmcgRecord>>> {
    let query = FmcgQuery::parse(raw.as_deref().unwrap_or_default());
    let records = service::list(get_connection(), &query.filters).await?;
    Ok(Json(records))
}

/// GET /api/fmcg/health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
