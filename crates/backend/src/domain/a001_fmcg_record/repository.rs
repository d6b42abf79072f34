use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d400_fmcg_trends::{FilterDimension, Filters};
use contracts::domain::a001_fmcg_record::{FmcgRecord, FmcgRecordId};
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, Statement, Value};

pub const TABLE: &str = "fmcg_data";

/// Rows per multi-row INSERT, well under SQLite's bound-parameter limit
const INSERT_CHUNK: usize = 200;

const COLUMNS: &[&str] = &[
    "market",
    "channel",
    "region",
    "category",
    "sub_category",
    "brand",
    "variant",
    "pack_type",
    "ppg",
    "pack_size",
    "year",
    "month",
    "week",
    "date",
    "br_cat_id",
    "sales_value",
    "volume",
    "volume_units",
];

#[derive(Debug, Clone, FromQueryResult)]
struct FmcgRecordRow {
    id: i64,
    market: Option<String>,
    channel: Option<String>,
    region: Option<String>,
    category: Option<String>,
    sub_category: Option<String>,
    brand: Option<String>,
    variant: Option<String>,
    pack_type: Option<String>,
    ppg: Option<String>,
    pack_size: Option<String>,
    year: Option<i32>,
    month: Option<i32>,
    week: Option<i32>,
    date: Option<String>,
    br_cat_id: Option<String>,
    sales_value: Option<f64>,
    volume: Option<f64>,
    volume_units: Option<f64>,
}

impl From<FmcgRecordRow> for FmcgRecord {
    fn from(row: FmcgRecordRow) -> Self {
        FmcgRecord {
            id: Some(FmcgRecordId(row.id)),
            market: row.market,
            channel: row.channel,
            region: row.region,
            category: row.category,
            sub_category: row.sub_category,
            brand: row.brand,
            variant: row.variant,
            pack_type: row.pack_type,
            ppg: row.ppg,
            pack_size: row.pack_size,
            year: row.year,
            month: row.month,
            week: row.week,
            date: row
                .date
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
            br_cat_id: row.br_cat_id,
            sales_value: row.sales_value.unwrap_or(0.0),
            volume: row.volume.unwrap_or(0.0),
            volume_units: row.volume_units.unwrap_or(0.0),
        }
    }
}

/// `WHERE col IN (?, ...) AND ...` for every dimension with a selection, plus its values.
/// Empty when nothing is selected. Years that are not integers are ignored.
pub fn filter_clause(filters: &Filters) -> (String, Vec<Value>) {
    let filters = filters.normalized();
    let mut conditions: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    for dim in FilterDimension::ALL {
        let dim_values: Vec<Value> = match dim {
            FilterDimension::Year => filters
                .values(dim)
                .iter()
                .filter_map(|y| y.parse::<i32>().ok())
                .map(Value::from)
                .collect(),
            _ => filters
                .values(dim)
                .iter()
                .map(|v| Value::from(v.clone()))
                .collect(),
        };
        if dim_values.is_empty() {
            continue;
        }
        let placeholders = vec!["?"; dim_values.len()].join(", ");
        conditions.push(format!("{} IN ({})", dim.key(), placeholders));
        values.extend(dim_values);
    }

    if conditions.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), values)
    }
}

/// Raw rows matching the filters, in insertion order
pub async fn list<C: ConnectionTrait>(db: &C, filters: &Filters, limit: u64) -> Result<Vec<FmcgRecord>> {
    let (where_sql, mut values) = filter_clause(filters);
    let sql = format!("SELECT id, {} FROM {TABLE}{where_sql} ORDER BY id LIMIT ?", COLUMNS.join(", "));
    values.push(Value::from(limit as i64));

    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values);
    let rows = FmcgRecordRow::find_by_statement(stmt).all(db).await?;
    Ok(rows.into_iter().map(FmcgRecord::from).collect())
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<i64> {
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT COUNT(*) AS count FROM {TABLE}"),
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "count")?),
        None => Ok(0),
    }
}

/// Bulk insert; callers wrap this in a transaction
pub async fn insert_many<C: ConnectionTrait>(db: &C, records: &[FmcgRecord]) -> Result<usize> {
    let row_placeholders = format!("({})", vec!["?"; COLUMNS.len()].join(", "));

    for chunk in records.chunks(INSERT_CHUNK) {
        let sql = format!(
            "INSERT INTO {TABLE} ({}) VALUES {}",
            COLUMNS.join(", "),
            vec![row_placeholders.as_str(); chunk.len()].join(", ")
        );
        let values: Vec<Value> = chunk.iter().flat_map(record_values).collect();
        db.execute(Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values))
            .await?;
    }
    Ok(records.len())
}

fn record_values(r: &FmcgRecord) -> Vec<Value> {
    vec![
        r.market.clone().into(),
        r.channel.clone().into(),
        r.region.clone().into(),
        r.category.clone().into(),
        r.sub_category.clone().into(),
        r.brand.clone().into(),
        r.variant.clone().into(),
        r.pack_type.clone().into(),
        r.ppg.clone().into(),
        r.pack_size.clone().into(),
        r.year.into(),
        r.month.into(),
        r.week.into(),
        r.date.map(|d| d.format("%Y-%m-%d").to_string()).into(),
        r.br_cat_id.clone().into(),
        r.sales_value.into(),
        r.volume.into(),
        r.volume_units.into(),
    ]
}

#[cfg(test)]
pub(crate) mod test_data {
    use super::*;

    pub fn record(brand: &str, ppg: &str, channel: &str, year: i32, month: i32, sales: f64, volume: f64) -> FmcgRecord {
        FmcgRecord {
            brand: Some(brand.into()),
            ppg: Some(ppg.into()),
            pack_type: Some("Small".into()),
            channel: Some(channel.into()),
            year: Some(year),
            month: Some(month),
            date: NaiveDate::from_ymd_opt(year, month as u32, 1),
            sales_value: sales,
            volume,
            ..Default::default()
        }
    }

    /// Two brands over two years and two channels
    pub fn sample() -> Vec<FmcgRecord> {
        vec![
            record("Brand 1", "Small Single", "Tesco", 2022, 1, 100.0, 10.0),
            record("Brand 1", "Small Single", "Tesco", 2022, 2, 50.0, 5.0),
            record("Brand 1", "Others", "Iceland", 2023, 1, 25.0, 2.5),
            record("Brand 2", "Others", "Tesco", 2022, 1, 30.0, 3.0),
            record("Brand 2", "Small Multi", "Iceland", 2023, 2, 70.0, 7.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::test_data::*;
    use super::*;
    use crate::shared::data::db::memory_connection;

    #[test]
    fn test_filter_clause_binds_one_value_per_selection() {
        let filters = Filters {
            brand: vec!["Brand 1".into(), "All".into(), "Brand 2".into()],
            year: vec!["2022".into(), "abc".into()],
            channel: vec!["Tesco".into()],
            ..Filters::default()
        };
        let (sql, values) = filter_clause(&filters);
        assert_eq!(sql, " WHERE brand IN (?, ?) AND year IN (?) AND channel IN (?)");
        assert_eq!(values.len(), 4);
        assert_eq!(values[2], Value::from(2022));

        let (sql, values) = filter_clause(&Filters::default());
        assert!(sql.is_empty());
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = memory_connection().await;
        assert_eq!(insert_many(&db, &sample()).await.unwrap(), 5);
        assert_eq!(count(&db).await.unwrap(), 5);

        let filters = Filters {
            brand: vec!["Brand 1".into()],
            year: vec!["2022".into()],
            ..Filters::default()
        };
        let rows = list(&db, &filters, 500).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sales_value, 100.0);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2022, 1, 1));
        assert!(rows[0].id.is_some());

        assert_eq!(list(&db, &Filters::default(), 3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_insert_spans_chunks() {
        let db = memory_connection().await;
        let many: Vec<FmcgRecord> = (0..(INSERT_CHUNK * 2 + 7))
            .map(|i| record("Brand 3", "Others", "Tesco", 2021, 1 + (i % 12) as i32, 1.0, 1.0))
            .collect();
        insert_many(&db, &many).await.unwrap();
        assert_eq!(count(&db).await.unwrap(), many.len() as i64);
    }
}
