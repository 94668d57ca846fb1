//! Home page route handler.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::{CatalogRepository, ContentRepository};
use crate::error::Result;
use crate::filters;
use crate::models::HomeContent;
use crate::state::AppState;

/// How many of the newest products the home page shows.
const LATEST_PRODUCT_COUNT: usize = 8;

/// How many of the newest posts the home page shows.
const LATEST_POST_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub content: Arc<HomeContent>,
    pub cart_count: u32,
}

/// Display the home page.
///
/// Content is assembled from the hero carousel, the admin-curated featured
/// sections, the newest products and the latest blog posts, and cached for
/// a minute.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: tower_sessions::Session,
) -> Result<HomeTemplate> {
    let content = match state.home_cache().get(&"home").await {
        Some(content) => content,
        None => {
            let content = Arc::new(load_home_content(&state).await?);
            state.home_cache().insert("home", content.clone()).await;
            content
        }
    };

    let cart_count = super::cart::session_cart(&session).await?.item_count();

    Ok(HomeTemplate {
        content,
        cart_count,
    })
}

async fn load_home_content(state: &AppState) -> Result<HomeContent> {
    let catalog = CatalogRepository::new(state.pool());
    let content = ContentRepository::new(state.pool());

    let slides = content.hero_slides().await?;
    let sections = content.featured_sections().await?;

    let mut latest_products = catalog.list_published().await?;
    latest_products.truncate(LATEST_PRODUCT_COUNT);

    let mut latest_posts = content.list_published_posts().await?;
    latest_posts.truncate(LATEST_POST_COUNT);

    Ok(HomeContent {
        slides,
        sections,
        latest_products,
        latest_posts,
    })
}
