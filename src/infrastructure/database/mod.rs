//! Postgres-backed registration store.

mod postgres_repository;

pub use postgres_repository::PostgresRepository;

use crate::config::DatabaseConfig;
use crate::domain::RepositoryPtr;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Wrap a pool in a [`RepositoryPtr`].
pub fn create_postgres_repository(pool: PgPool) -> RepositoryPtr {
    // ---
    Arc::new(PostgresRepository::new(pool))
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    // ---
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

/// Build a pool that connects on first use.
///
/// # Errors
/// Returns an error if the connection string cannot be parsed.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    pool_options(config)
        .connect_lazy(&config.database_url)
        .context("invalid DATABASE_URL")
}

/// Connect to Postgres, retrying while the server comes up, then run migrations.
///
/// # Errors
/// Returns the last connection error once `retry_count` attempts are spent,
/// or any migration failure.
pub async fn init_database_with_retry(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let mut attempt: u32 = 0;

    let pool = loop {
        attempt += 1;
        match pool_options(config).connect(&config.database_url).await {
            Ok(pool) => break pool,
            Err(e) if attempt < config.retry_count => {
                tracing::warn!(
                    "Database not ready (attempt {}/{}): {}",
                    attempt,
                    config.retry_count,
                    e
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("database unreachable after {attempt} attempts")
                })
            }
        }
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    tracing::info!("Database ready after {} attempt(s)", attempt);
    Ok(pool)
}

/// Same as [`init_database_with_retry`], reading [`DatabaseConfig`] from the environment.
pub async fn init_database_with_retry_from_env() -> Result<PgPool> {
    // ---
    let config = DatabaseConfig::from_env()?;
    init_database_with_retry(&config).await
}
