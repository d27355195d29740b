//! Database connection pool management.

use log::{error, info};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::error_handling::StorageError;

/// Connects a Postgres pool with the configured limits.
///
/// No schema objects are created here; run
/// [`StatusStore::ensure_types`](crate::StatusStore::ensure_types) before inserting.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            StorageError::Connect(e.to_string())
        })?;

    info!(
        "Database pool ready (max {} connections)",
        config.max_connections
    );
    Ok(pool)
}
