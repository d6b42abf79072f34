use anyhow::{Context, Result};

use crate::shared::config::{get_database_path, resolve_path, Config};
use crate::shared::data::db::{self, get_connection};
use crate::system::auth::jwt;
use crate::system::handlers::auth::set_google_client_id;
use crate::usecases::u501_import_fmcg_csv;

/// Open the database, prepare auth and load seed data
pub async fn initialize(config: &Config) -> Result<()> {
    db::initialize_database(&get_database_path(config))
        .await
        .context("db init failed")?;

    jwt::initialize(get_connection(), &config.auth).await?;
    tracing::info!(
        "Access tokens expire after {} minutes",
        config.auth.access_token_minutes
    );

    set_google_client_id(config.auth.google_client_id());
    if config.auth.google_client_id().is_none() {
        tracing::warn!("auth.google_client_id is not set, Google sign-in is disabled");
    }

    seed_fmcg_data(config).await;
    Ok(())
}

/// A broken seed file is logged, the server still starts
async fn seed_fmcg_data(config: &Config) {
    let Some(raw) = config.data.seed_csv() else {
        return;
    };
    let path = resolve_path(raw);
    match u501_import_fmcg_csv::seed_if_empty(get_connection(), &path).await {
        Ok(Some(summary)) => tracing::info!(
            "Seeded {} FMCG rows ({} skipped)",
            summary.inserted,
            summary.skipped
        ),
        Ok(None) => {}
        Err(e) => tracing::error!("FMCG seed failed: {:#}", e),
    }
}
