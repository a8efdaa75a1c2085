//! # Geogate DB
//!
//! Database pool and grant queries for the Geogate API.
//!
//! This crate provides:
//!
//! - [`init_db_pool`] / [`run_migrations`]: PostgreSQL pool setup using SQLx
//! - [`AccessStore`]: the queries the authorization engine depends on
//! - [`PgAccessStore`]: the PostgreSQL implementation of [`AccessStore`]
//! - [`filters`]: SQL predicate builders for scoped listings
//! - `InMemoryAccessStore` (feature `test-utils`): a store backed by plain collections
//!
//! # Example
//!
//! ```ignore
//! use geogate_config::DatabaseConfig;
//! use geogate_db::{PgAccessStore, init_db_pool};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//!     let store = PgAccessStore::new(pool);
//!     let rows = store.permission_grants(42).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod filters;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod store;

use geogate_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use error::StoreError;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryAccessStore;
pub use postgres::PgAccessStore;
pub use store::AccessStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and should be created once at startup.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool initialized");
    Ok(pool)
}

/// Applies the SQL migrations shipped in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
