//! Admin API route handlers.
//!
//! # API Map
//!
//! - `POST /auth/login`, `POST /auth/logout`, `GET /auth/me`
//! - `GET/POST /api/products`, `GET/PUT/DELETE /api/products/{id}` (and the
//!   same shape for categories, blog-posts, hero-slides, featured-sections)
//! - `GET /api/orders`, `GET /api/orders/{id}`,
//!   `POST /api/orders/{id}/status`, `POST /api/orders/{id}/deliver`
//! - `POST /api/uploads`
//! - `GET /api/dashboard`
//! - `GET/POST /api/staff`, `DELETE /api/staff/{id}` (super admin only)
//!
//! All endpoints speak JSON. Everything under `/api` and `/auth/me`
//! requires a logged-in admin via the session cookie.

pub mod admin_users;
pub mod auth;
pub mod crud;
pub mod dashboard;
pub mod orders;
pub mod uploads;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::db::{BlogPostStore, CategoryStore, FeaturedSectionStore, HeroSlideStore, ProductStore};
use crate::state::AppState;

pub use crud::crud_router;

/// Authentication routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// CRUD routes for every managed resource.
pub fn resource_routes(state: &AppState) -> Router {
    let pool = state.pool();
    Router::new()
        .nest("/products", crud_router(ProductStore::new(pool.clone())))
        .nest("/categories", crud_router(CategoryStore::new(pool.clone())))
        .nest("/blog-posts", crud_router(BlogPostStore::new(pool.clone())))
        .nest(
            "/hero-slides",
            crud_router(HeroSlideStore::new(pool.clone())),
        )
        .nest(
            "/featured-sections",
            crud_router(FeaturedSectionStore::new(pool.clone())),
        )
}

/// Order workflow routes.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::fetch))
        .route("/{id}/status", post(orders::update_status))
        .route("/{id}/deliver", post(orders::deliver))
}

/// Staff management routes, super admin only.
pub fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_users::list).post(admin_users::create))
        .route("/{id}", delete(admin_users::remove))
}
