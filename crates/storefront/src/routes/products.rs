//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Category, Product};
use crate::state::AppState;

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub cart_count: u32,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Product,
    pub cart_count: u32,
}

/// Display all published products.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: tower_sessions::Session,
) -> Result<ProductIndexTemplate> {
    let catalog = CatalogRepository::new(state.pool());
    let products = catalog.list_published().await?;
    let categories = catalog.list_categories().await?;
    let cart_count = super::cart::session_cart(&session).await?.item_count();

    Ok(ProductIndexTemplate {
        products,
        categories,
        cart_count,
    })
}

/// Display a single product with its plans, denominations and FAQs.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = CatalogRepository::new(state.pool());
    let product = catalog
        .product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;
    let cart_count = super::cart::session_cart(&session).await?.item_count();

    Ok(ProductShowTemplate {
        product,
        cart_count,
    })
}
