//! # TutorHub DB
//!
//! PostgreSQL pool construction and the embedded schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use tutorhub_config::DatabaseConfig;
//! use tutorhub_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tutorhub_config::DatabaseConfig;

pub use sqlx::PgPool;

/// Schema migrations, shared with `#[sqlx::test]`.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a pool sized and bounded by `config`.
///
/// Acquiring a connection gives up after five seconds, so a request never
/// waits on the pool indefinitely.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        "connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url())
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
