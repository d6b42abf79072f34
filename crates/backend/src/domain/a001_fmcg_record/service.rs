use contracts::dashboards::d400_fmcg_trends::Filters;
use contracts::domain::a001_fmcg_record::FmcgRecord;
use sea_orm::{ConnectionTrait, TransactionTrait};

use super::repository;

/// Upper bound of the raw listing
pub const LIST_LIMIT: u64 = 500;

/// Raw records matching the filters, at most [`LIST_LIMIT`]
pub async fn list<C: ConnectionTrait>(db: &C, filters: &Filters) -> anyhow::Result<Vec<FmcgRecord>> {
    repository::list(db, filters, LIST_LIMIT).await
}

pub async fn count<C: ConnectionTrait>(db: &C) -> anyhow::Result<i64> {
    repository::count(db).await
}

/// Validate and store records in one transaction.
/// Returns (inserted, skipped); invalid records are skipped, not fatal.
pub async fn insert_valid<C>(db: &C, records: Vec<FmcgRecord>) -> anyhow::Result<(usize, usize)>
where
    C: ConnectionTrait + TransactionTrait,
{
    let total = records.len();
    let valid: Vec<FmcgRecord> = records
        .into_iter()
        .filter(|r| match r.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Skipping fmcg record: {}", e);
                false
            }
        })
        .collect();

    let txn = db.begin().await?;
    let inserted = repository::insert_many(&txn, &valid).await?;
    txn.commit().await?;

    Ok((inserted, total - inserted))
}
