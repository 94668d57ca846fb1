//! Database operations for the storefront `PostgreSQL`.
//!
//! # Database
//!
//! The storefront reads the catalog and content tables and appends orders:
//!
//! - `category`, `product`, `subscription_plan`, `plan_duration`,
//!   `denomination`, `product_faq`, `product_tag` - catalog
//! - `blog_post`, `hero_slide`, `featured_section` - content
//! - `"order"`, `order_item`, `order_number_seq` - checkout output
//! - `tower_sessions.session` - tower-sessions storage
//!
//! Queries are runtime `query_as` with `FromRow` row structs converted into
//! domain types; no compile-time database connection is required.
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p kinmel-cli -- migrate storefront
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod catalog;
pub mod content;
pub mod orders;

pub use catalog::CatalogRepository;
pub use content::ContentRepository;
pub use orders::OrderRepository;

/// Errors from the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
