//! Video persistence for Tubely.
//!
//! [`repositories::VideoRepo`] holds the SQL; [`store::VideoStore`] is the
//! narrow interface the API depends on, with a Postgres and an in-memory
//! implementation.

pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use store::{MemoryVideoStore, PgVideoStore, StoreError, VideoStore};

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
