//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Category, Product};
use crate::state::AppState;

/// Category listing template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoryIndexTemplate {
    pub categories: Vec<Category>,
    pub cart_count: u32,
}

/// Category detail template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub category: Category,
    pub products: Vec<Product>,
    pub cart_count: u32,
}

/// Display all categories.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: tower_sessions::Session,
) -> Result<CategoryIndexTemplate> {
    let catalog = CatalogRepository::new(state.pool());
    let categories = catalog.list_categories().await?;
    let cart_count = super::cart::session_cart(&session).await?.item_count();

    Ok(CategoryIndexTemplate {
        categories,
        cart_count,
    })
}

/// Display published products within a category.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Path(slug): Path<String>,
) -> Result<CategoryShowTemplate> {
    let catalog = CatalogRepository::new(state.pool());
    let category = catalog
        .category_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {slug}")))?;
    let products = catalog.list_in_category(category.id).await?;
    let cart_count = super::cart::session_cart(&session).await?.item_count();

    Ok(CategoryShowTemplate {
        category,
        products,
        cart_count,
    })
}
