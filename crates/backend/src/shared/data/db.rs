use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS fmcg_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        market TEXT,
        channel TEXT,
        region TEXT,
        category TEXT,
        sub_category TEXT,
        brand TEXT,
        variant TEXT,
        pack_type TEXT,
        ppg TEXT,
        pack_size TEXT,
        year INTEGER,
        month INTEGER,
        week INTEGER,
        date TEXT,
        br_cat_id TEXT,
        sales_value REAL NOT NULL DEFAULT 0,
        volume REAL NOT NULL DEFAULT 0,
        volume_units REAL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_fmcg_data_brand ON fmcg_data (brand);",
    "CREATE INDEX IF NOT EXISTS idx_fmcg_data_pack_type ON fmcg_data (pack_type);",
    "CREATE INDEX IF NOT EXISTS idx_fmcg_data_year_month ON fmcg_data (year, month);",
    r#"
    CREATE TABLE IF NOT EXISTS sys_users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT,
        role TEXT NOT NULL DEFAULT 'user',
        provider TEXT NOT NULL DEFAULT 'local',
        google_id TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_sys_users_google_id ON sys_users (google_id);",
    r#"
    CREATE TABLE IF NOT EXISTS sys_settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        description TEXT,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
];

pub async fn initialize_database(db_file: &std::path::Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    ensure_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Creates missing tables and indexes
pub async fn ensure_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Fresh in-memory database with the schema applied
#[cfg(test)]
pub async fn memory_connection() -> DatabaseConnection {
    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await.unwrap();
    ensure_schema(&conn).await.unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let conn = memory_connection().await;
        ensure_schema(&conn).await.unwrap();
        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|r| r.try_get::<String>("", "name").unwrap())
            .collect();
        for table in ["fmcg_data", "sys_settings", "sys_users"] {
            assert!(names.iter().any(|n| n == table), "{table} missing");
        }
    }
}
