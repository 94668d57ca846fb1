//! Database access layer for the admin.
//!
//! The admin owns the write side of the catalog and content tables the
//! storefront reads, plus the `admin_user` table and the order status
//! workflow.
//!
//! Repositories use runtime-checked queries; row types stay private to
//! each module and convert into the shared domain types.

pub mod admin_users;
pub mod catalog;
pub mod content;
pub mod crud;
pub mod orders;

pub use admin_users::AdminUserRepository;
pub use catalog::{CategoryStore, ProductStore};
pub use content::{BlogPostStore, FeaturedSectionStore, HeroSlideStore};
pub use crud::CrudStore;
pub use orders::AdminOrderRepository;

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data could not be converted into a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// The operation conflicts with current state.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create the admin database connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    use secrecy::ExposeSecret;

    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
