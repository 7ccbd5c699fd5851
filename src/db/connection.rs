use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::db::errors::{DatabaseError, Result};

/// Create the connection pool from the startup configuration.
/// Connects eagerly so a bad configuration fails at startup.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = config
        .connect_options()
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    info!(
        host = %options.get_host(),
        port = options.get_port(),
        database = ?options.get_database(),
        "Creating database connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Duration::from_secs(600))
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("Failed to create pool: {}", e)))?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Create a pool that connects on first use
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = config
        .connect_options()
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_lazy_with(options))
}

/// Health check for the database connection
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::QueryError)?;

    Ok(())
}
