//! Generic CRUD endpoints.
//!
//! Every managed resource (products, categories, blog posts, hero
//! slides, featured sections) gets the same five JSON endpoints,
//! derived from its [`CrudStore`] implementation:
//!
//! - `GET    /`      - list all
//! - `POST   /`      - create from a draft
//! - `GET    /{id}`  - fetch one
//! - `PUT    /{id}`  - replace from a draft
//! - `DELETE /{id}`  - delete

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::db::CrudStore;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;

/// Build the five CRUD routes over a store.
pub fn crud_router<S: CrudStore>(store: S) -> Router {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route(
            "/{id}",
            get(fetch::<S>).put(update::<S>).delete(remove::<S>),
        )
        .with_state(store)
}

async fn list<S: CrudStore>(
    RequireAdminAuth(_): RequireAdminAuth,
    State(store): State<S>,
) -> Result<Json<Vec<S::Entity>>> {
    Ok(Json(store.list().await?))
}

async fn fetch<S: CrudStore>(
    RequireAdminAuth(_): RequireAdminAuth,
    State(store): State<S>,
    Path(id): Path<i32>,
) -> Result<Json<S::Entity>> {
    Ok(Json(store.get(id).await?))
}

async fn create<S: CrudStore>(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(store): State<S>,
    Json(draft): Json<S::Draft>,
) -> Result<(StatusCode, Json<S::Entity>)> {
    let entity = store.create(draft).await?;
    tracing::info!(resource = S::RESOURCE, admin = %admin.email, "Created");
    Ok((StatusCode::CREATED, Json(entity)))
}

async fn update<S: CrudStore>(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(store): State<S>,
    Path(id): Path<i32>,
    Json(draft): Json<S::Draft>,
) -> Result<Json<S::Entity>> {
    let entity = store.update(id, draft).await?;
    tracing::info!(resource = S::RESOURCE, id, admin = %admin.email, "Updated");
    Ok(Json(entity))
}

async fn remove<S: CrudStore>(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(store): State<S>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    store.delete(id).await?;
    tracing::info!(resource = S::RESOURCE, id, admin = %admin.email, "Deleted");
    Ok(StatusCode::NO_CONTENT)
}
