//! `penca-db` -- sqlx/Postgres persistence for the prediction-pool pipeline.
//!
//! `models` holds `FromRow` entity structs and insert DTOs; `repositories`
//! holds zero-sized repo structs whose async methods take `&PgPool` as the
//! first argument. Every mutation the pipeline performs is an idempotent
//! upsert or a guarded conditional update, so partial job runs are safe to
//! repeat.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from the crate's `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
