//! PostgreSQL persistence for Cinelog.
//!
//! Pool bootstrap and migrations live here; table access is split into
//! [`models`] (row structs and DTOs) and [`repositories`] (query functions).
//! [`catalog_store::PgCatalogStore`] plugs the record repository into the
//! catalog engine.

use sqlx::postgres::PgPoolOptions;

pub mod catalog_store;
pub mod models;
pub mod repositories;

pub use catalog_store::PgCatalogStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
