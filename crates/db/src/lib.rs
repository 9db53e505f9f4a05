//! PostgreSQL persistence for the hostel backend.
//!
//! - [`models`] -- row structs and create/update DTOs, one module per table.
//! - [`repositories`] -- zero-sized `*Repo` structs with async queries.
//! - [`adapters`] -- Postgres implementations of the `hostel-core` ports.

use sqlx::postgres::PgPoolOptions;

pub mod adapters;
pub mod models;
pub mod repositories;

mod serde_ext;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
