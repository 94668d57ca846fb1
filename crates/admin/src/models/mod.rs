//! Domain models for the admin.

pub mod admin_user;

pub use admin_user::{AdminRole, AdminUser, CurrentAdmin};

/// Session keys used by the admin.
pub mod session_keys {
    /// The logged-in staff member (`crate::models::CurrentAdmin`).
    pub const CURRENT_ADMIN: &str = "current_admin";
}
