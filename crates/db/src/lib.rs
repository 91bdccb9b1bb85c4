//! Persistence layer for Inkwell documents.
//!
//! [`DocumentStore`] is the seam the API server depends on. Two
//! implementations are provided:
//! - [`PgDocumentStore`] -- PostgreSQL via sqlx, one row per document.
//! - [`MemoryDocumentStore`] -- process-local map, for tests and local runs.

pub mod memory;
pub mod models;
pub mod pg;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryDocumentStore;
pub use pg::PgDocumentStore;
pub use store::{DocumentStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
