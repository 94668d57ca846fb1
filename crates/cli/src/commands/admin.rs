//! Staff account management commands.
//!
//! # Usage
//!
//! ```bash
//! km-cli admin create -e staff@example.com -n "Staff Name" -r super_admin -p <password>
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for admin database

use secrecy::SecretString;
use thiserror::Error;

use kinmel_admin::db::{self, AdminUserRepository, RepositoryError};
use kinmel_admin::models::AdminRole;
use kinmel_admin::services::auth::{self, AuthError};
use kinmel_core::{Email, EmailError};

/// Errors that can occur during staff account operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid email address.
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    /// Invalid role name.
    #[error("Invalid role: {0} (expected `editor` or `super_admin`)")]
    InvalidRole(String),

    /// Password hashing failed.
    #[error("Password error: {0}")]
    Password(#[from] AuthError),
}

/// Create a staff account with a hashed password.
///
/// # Errors
///
/// Returns `AdminError` if inputs are invalid or the insert fails.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| AdminError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    let email = Email::parse(email)?;
    let role = match role {
        "editor" => AdminRole::Editor,
        "super_admin" => AdminRole::SuperAdmin,
        other => return Err(AdminError::InvalidRole(other.to_owned())),
    };
    let password_hash = auth::hash_password(password)?;

    let pool = db::create_pool(&database_url).await?;
    let user = AdminUserRepository::new(&pool)
        .create(&email, name, role, &password_hash)
        .await?;

    tracing::info!(email = %user.email, role = ?user.role, "Staff account created");
    Ok(())
}
