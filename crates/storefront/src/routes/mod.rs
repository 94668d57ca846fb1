//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Catalog
//! GET  /products               - Product listing
//! GET  /products/{slug}        - Product detail
//! GET  /categories             - Category listing
//! GET  /categories/{slug}      - Products in a category
//!
//! # Blog
//! GET  /blog                   - Published posts
//! GET  /blog/{slug}            - Post detail
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment; 0 removes)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout wizard
//! GET  /checkout               - Current wizard step
//! POST /checkout/information   - Submit step 1 (contact details)
//! POST /checkout/payment       - Submit step 2 (payment method)
//! POST /checkout/proof         - Upload payment screenshot (multipart)
//! POST /checkout/place         - Submit step 3, place the order
//! POST /checkout/back          - Step back without losing entered values
//! GET  /orders/{number}        - Order confirmation page
//! ```

pub mod blog;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{slug}", get(categories::show))
}

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::index))
        .route("/{slug}", get(blog::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/information", post(checkout::submit_information))
        .route("/payment", post(checkout::submit_payment))
        .route("/proof", post(checkout::upload_proof))
        .route("/place", post(checkout::place))
        .route("/back", post(checkout::back))
}
