use contracts::dashboards::d400_fmcg_trends::{
    AggregateRow, AggregateStats, FmcgQuery, MarketShareRow,
};
use sea_orm::ConnectionTrait;

use super::repository::{self, GroupColumn};
use crate::shared::error::{AppError, AppResult};
use crate::shared::format::round2;

/// Validate requested `group_by` names, keeping order and dropping repeats
pub fn parse_group_by(names: &[String]) -> AppResult<Vec<GroupColumn>> {
    if names.is_empty() {
        return Err(AppError::bad_request("group_by cannot be empty"));
    }
    let mut columns: Vec<GroupColumn> = Vec::with_capacity(names.len());
    for name in names {
        let col = GroupColumn::from_name(name).ok_or_else(|| {
            let allowed = GroupColumn::ALLOWED
                .iter()
                .map(|c| format!("'{}'", c.name()))
                .collect::<Vec<_>>()
                .join(", ");
            AppError::bad_request(format!("Invalid group_by: {name}. Allowed: [{allowed}]"))
        })?;
        if !columns.contains(&col) {
            columns.push(col);
        }
    }
    Ok(columns)
}

/// Grouped sums of the requested metric
pub async fn aggregate<C: ConnectionTrait>(db: &C, query: &FmcgQuery) -> AppResult<Vec<AggregateRow>> {
    let columns = parse_group_by(&query.group_by)?;
    Ok(repository::grouped(db, query.metric, &columns, &query.filters).await?)
}

/// Monthly series: always year and month, then any other requested dimensions
pub async fn trend<C: ConnectionTrait>(db: &C, query: &FmcgQuery) -> AppResult<Vec<AggregateRow>> {
    let mut columns = vec![GroupColumn::Year, GroupColumn::Month];
    if !query.group_by.is_empty() {
        columns.extend(
            parse_group_by(&query.group_by)?
                .into_iter()
                .filter(|c| !c.is_period()),
        );
    }
    Ok(repository::grouped(db, query.metric, &columns, &query.filters).await?)
}

/// Grouped sums with each group's share of the total
pub async fn market_share<C: ConnectionTrait>(db: &C, query: &FmcgQuery) -> AppResult<Vec<MarketShareRow>> {
    let rows = aggregate(db, query).await?;
    Ok(with_percentages(rows))
}

/// `percentage = value / total * 100`, a zero total counts as 1
pub fn with_percentages(rows: Vec<AggregateRow>) -> Vec<MarketShareRow> {
    let total: f64 = rows.iter().map(|r| r.value).sum();
    let total = if total == 0.0 { 1.0 } else { total };
    rows.into_iter()
        .map(|row| MarketShareRow {
            percentage: round2(row.value / total * 100.0),
            row,
        })
        .collect()
}

pub async fn stats<C: ConnectionTrait>(db: &C, query: &FmcgQuery) -> AppResult<AggregateStats> {
    Ok(repository::stats(db, query.metric, &query.filters).await?)
}
