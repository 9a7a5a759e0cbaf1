//! # Accounts DB
//!
//! User storage for the accounts service.
//!
//! Handlers talk to storage through the [`UserRepository`] trait, held as an
//! `Arc<dyn UserRepository>` in application state. Two backends implement it:
//!
//! - [`PgUserRepository`]: PostgreSQL through SQLx
//! - [`InMemoryUserRepository`]: a process-local map for tests and demos
//!
//! # Example
//!
//! ```ignore
//! use accounts_db::{PgUserRepository, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));
//! ```

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use accounts_config::DatabaseConfig;

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
pub use repository::UserRepository;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Database migrations applied");
    Ok(())
}
