use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use vidnest_core::Config;

const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../migrations")
}

/// Open the Postgres pool and bring the schema up to date.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let max_connections = config.db_max_connections();
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(config.database_url())
        .await
        .context("Could not reach the document store")?;
    tracing::info!(max_connections, "Document store pool ready");

    let dir = migrations_dir();
    Migrator::new(dir.clone())
        .await
        .with_context(|| format!("Could not read migrations from {}", dir.display()))?
        .run(&pool)
        .await
        .context("Schema migration failed")?;
    tracing::info!("Schema is up to date");

    Ok(pool)
}
