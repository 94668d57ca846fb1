//! Domain models for the storefront.
//!
//! Catalog and content entities as the storefront reads them. Orders and
//! the cart come from `kinmel-core`; these types cover what the shop
//! renders.

pub mod catalog;
pub mod content;

pub use catalog::{Category, Denomination, Faq, PlanDuration, Product, SubscriptionPlan};
pub use content::{BlogPost, FeaturedSection, HeroSlide, HomeContent};

/// Session keys used by the storefront.
///
/// The cart and the in-progress checkout live in the tower-sessions store
/// under these keys.
pub mod session_keys {
    /// The shopper's cart (`kinmel_core::Cart`).
    pub const CART: &str = "cart";
    /// The checkout wizard state (`crate::routes::checkout::CheckoutState`).
    pub const CHECKOUT: &str = "checkout";
}
