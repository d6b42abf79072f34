use anyhow::{Context, Result};
use contracts::dashboards::d400_fmcg_trends::ImportSummary;
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::path::Path;

use super::csv_parser::parse_fmcg_csv;
use crate::domain::a001_fmcg_record::service as record_service;

/// Parse an uploaded export and store every complete row in one transaction
pub async fn import_csv<C>(db: &C, bytes: &[u8]) -> Result<ImportSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    let parsed = parse_fmcg_csv(bytes)?;
    let (inserted, skipped) = record_service::insert_valid(db, parsed.records).await?;

    let summary = ImportSummary {
        inserted,
        skipped: skipped + parsed.malformed,
    };
    tracing::info!(
        "FMCG import finished: {} inserted, {} skipped",
        summary.inserted,
        summary.skipped
    );
    Ok(summary)
}

/// Load the seed export at start-up, only into an empty table
pub async fn seed_if_empty<C>(db: &C, csv_path: &Path) -> Result<Option<ImportSummary>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let existing = record_service::count(db).await?;
    if existing > 0 {
        tracing::info!("fmcg_data already has {} rows, skipping seed", existing);
        return Ok(None);
    }

    let bytes = std::fs::read(csv_path)
        .with_context(|| format!("Failed to read seed CSV {}", csv_path.display()))?;
    tracing::info!(
        "Seeding fmcg_data from {} ({})",
        csv_path.display(),
        crate::shared::format::format_size(bytes.len())
    );
    import_csv(db, &bytes).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::memory_connection;

    const CSV: &str = "Brand,Channel,PackType,PPG,Year,Month,SalesValue,Volume\n\
Brand 1,Tesco,Small,Small Single,2022,1,10,1\n\
Brand 2,Tesco,Small,Others,2022,2,20,2\n\
Brand 3,,Small,Others,2022,3,30,3\n\
Brand 4,Iceland,Large,Others,2022,13,40,4\n";

    #[tokio::test]
    async fn test_import_skips_incomplete_rows() {
        let db = memory_connection().await;
        let summary = import_csv(&db, CSV.as_bytes()).await.unwrap();
        assert_eq!(summary, ImportSummary { inserted: 2, skipped: 2 });
        assert_eq!(record_service::count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_table() {
        let db = memory_connection().await;
        let path = std::env::temp_dir().join(format!("fmcg_seed_{}.csv", std::process::id()));
        std::fs::write(&path, CSV).unwrap();

        let first = seed_if_empty(&db, &path).await.unwrap();
        assert_eq!(first.map(|s| s.inserted), Some(2));
        let second = seed_if_empty(&db, &path).await.unwrap();
        assert!(second.is_none());
        assert_eq!(record_service::count(&db).await.unwrap(), 2);

        std::fs::remove_file(&path).ok();
    }
}
