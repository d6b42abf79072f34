use anyhow::Result;
use contracts::dashboards::d400_fmcg_trends::{
    AggregateRow, AggregateStats, DimensionValue, Filters, Metric,
};
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, QueryResult, Statement};

use crate::domain::a001_fmcg_record::repository::{filter_clause, TABLE};
use crate::shared::format::round2;

/// Column a grouped query may split by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Year,
    Month,
    PackType,
    Ppg,
    Channel,
    Brand,
}

impl GroupColumn {
    pub const ALLOWED: [GroupColumn; 6] = [
        GroupColumn::Year,
        GroupColumn::Month,
        GroupColumn::PackType,
        GroupColumn::Ppg,
        GroupColumn::Channel,
        GroupColumn::Brand,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GroupColumn::Year => "year",
            GroupColumn::Month => "month",
            GroupColumn::PackType => "pack_type",
            GroupColumn::Ppg => "ppg",
            GroupColumn::Channel => "channel",
            GroupColumn::Brand => "brand",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALLOWED.into_iter().find(|c| c.name() == name)
    }

    pub fn is_period(&self) -> bool {
        matches!(self, GroupColumn::Year | GroupColumn::Month)
    }

    fn read(&self, row: &QueryResult) -> Result<DimensionValue> {
        let col = self.name();
        Ok(if self.is_period() {
            DimensionValue::Int(row.try_get::<Option<i32>>("", col)?)
        } else {
            DimensionValue::Text(row.try_get::<Option<String>>("", col)?)
        })
    }
}

/// `SELECT <cols>, SUM(metric) ... GROUP BY <cols> ORDER BY <cols>` with bound filter values
pub fn grouped_statement(metric: Metric, columns: &[GroupColumn], filters: &Filters) -> Statement {
    let (where_sql, values) = filter_clause(filters);
    let cols = columns.iter().map(GroupColumn::name).collect::<Vec<_>>().join(", ");
    let sql = format!(
        "SELECT {cols}, CAST(COALESCE(SUM({metric}), 0) AS REAL) AS value \
         FROM {TABLE}{where_sql} GROUP BY {cols} ORDER BY {cols}",
        metric = metric.column(),
    );
    Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values)
}

/// Sum of the metric per combination of the group columns, rounded to 2 decimals
pub async fn grouped<C: ConnectionTrait>(
    db: &C,
    metric: Metric,
    columns: &[GroupColumn],
    filters: &Filters,
) -> Result<Vec<AggregateRow>> {
    if columns.is_empty() {
        anyhow::bail!("grouped query needs at least one column");
    }
    let rows = db.query_all(grouped_statement(metric, columns, filters)).await?;

    rows.iter()
        .map(|row| {
            let mut out = AggregateRow {
                value: round2(row.try_get::<Option<f64>>("", "value")?.unwrap_or(0.0)),
                ..Default::default()
            };
            for col in columns {
                out.set_dimension(col.name(), col.read(row)?);
            }
            Ok(out)
        })
        .collect()
}

#[derive(Debug, FromQueryResult)]
struct StatsRow {
    min_value: Option<f64>,
    max_value: Option<f64>,
    sum_value: Option<f64>,
    avg_value: Option<f64>,
    row_count: i64,
}

/// MIN / MAX / SUM / AVG / COUNT of the metric over matching records
pub async fn stats<C: ConnectionTrait>(db: &C, metric: Metric, filters: &Filters) -> Result<AggregateStats> {
    let (where_sql, values) = filter_clause(filters);
    let sql = format!(
        "SELECT CAST(MIN({m}) AS REAL) AS min_value, CAST(MAX({m}) AS REAL) AS max_value, \
         CAST(SUM({m}) AS REAL) AS sum_value, CAST(AVG({m}) AS REAL) AS avg_value, \
         COUNT(*) AS row_count FROM {TABLE}{where_sql}",
        m = metric.column(),
    );
    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values);

    let Some(row) = StatsRow::find_by_statement(stmt).one(db).await? else {
        return Ok(AggregateStats::default());
    };
    Ok(AggregateStats {
        min: round2(row.min_value.unwrap_or(0.0)),
        max: round2(row.max_value.unwrap_or(0.0)),
        sum: round2(row.sum_value.unwrap_or(0.0)),
        avg: round2(row.avg_value.unwrap_or(0.0)),
        count: row.row_count,
    })
}

/// Bound values of a statement, for assertions
#[cfg(test)]
fn bound_values(stmt: &Statement) -> Vec<sea_orm::Value> {
    stmt.values.as_ref().map(|v| v.0.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_fmcg_record::repository::{insert_many, test_data::sample};
    use crate::shared::data::db::memory_connection;

    #[test]
    fn test_grouped_statement() {
        let filters = Filters {
            brand: vec!["Brand 1".into(), "Brand 2".into()],
            ppg: vec!["Others".into()],
            ..Filters::default()
        };
        let stmt = grouped_statement(
            Metric::Volume,
            &[GroupColumn::Year, GroupColumn::Brand],
            &filters,
        );
        assert_eq!(
            stmt.sql,
            "SELECT year, brand, CAST(COALESCE(SUM(volume), 0) AS REAL) AS value \
             FROM fmcg_data WHERE brand IN (?, ?) AND ppg IN (?) GROUP BY year, brand ORDER BY year, brand"
        );
        assert_eq!(bound_values(&stmt).len(), 3);
    }

    #[test]
    fn test_group_column_names() {
        for col in GroupColumn::ALLOWED {
            assert_eq!(GroupColumn::from_name(col.name()), Some(col));
        }
        assert_eq!(GroupColumn::from_name("region"), None);
    }

    #[tokio::test]
    async fn test_grouped_sums() {
        let db = memory_connection().await;
        insert_many(&db, &sample()).await.unwrap();

        let rows = grouped(
            &db,
            Metric::Sales,
            &[GroupColumn::Year, GroupColumn::Brand],
            &Filters::default(),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].year, Some(2022));
        assert_eq!(rows[0].brand.as_deref(), Some("Brand 1"));
        assert_eq!(rows[0].value, 150.0);
        assert!(rows[0].month.is_none() && rows[0].ppg.is_none());

        let filters = Filters {
            channel: vec!["Iceland".into()],
            ..Filters::default()
        };
        let rows = grouped(&db, Metric::Volume, &[GroupColumn::Ppg], &filters)
            .await
            .unwrap();
        let ppgs: Vec<_> = rows.iter().map(|r| r.ppg.as_deref().unwrap()).collect();
        assert_eq!(ppgs, vec!["Others", "Small Multi"]);
        assert_eq!(rows[1].value, 7.0);
    }

    #[tokio::test]
    async fn test_stats() {
        let db = memory_connection().await;
        let empty = stats(&db, Metric::Sales, &Filters::default()).await.unwrap();
        assert_eq!(empty, AggregateStats::default());

        insert_many(&db, &sample()).await.unwrap();
        let s = stats(&db, Metric::Sales, &Filters::default()).await.unwrap();
        assert_eq!(s.count, 5);
        assert_eq!(s.min, 25.0);
        assert_eq!(s.max, 100.0);
        assert_eq!(s.sum, 275.0);
        assert_eq!(s.avg, 55.0);
    }
}
