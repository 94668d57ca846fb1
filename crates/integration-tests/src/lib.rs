//! Integration tests for Kinmel.
//!
//! Two kinds of tests live here:
//!
//! - Scenario tests that drive the cart, checkout wizard and order
//!   placement through the public types, with in-memory stores. These
//!   run anywhere.
//! - HTTP tests against locally running servers, marked `#[ignore]`.
//!
//! # Running the HTTP tests
//!
//! ```bash
//! cargo run -p kinmel-cli -- migrate all
//! cargo run -p kinmel-storefront &
//! cargo run -p kinmel-admin &
//! cargo test -p kinmel-integration-tests -- --ignored
//! ```

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client with a cookie store, so sessions persist across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
