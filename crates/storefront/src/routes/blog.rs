//! Blog route handlers. Post bodies are Markdown rendered via the
//! `markdown` template filter.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::db::ContentRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::BlogPost;
use crate::state::AppState;

/// Blog listing template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub posts: Vec<BlogPost>,
    pub cart_count: u32,
}

/// Blog post template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub post: BlogPost,
    pub cart_count: u32,
}

/// Display published posts, newest first.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: tower_sessions::Session,
) -> Result<BlogIndexTemplate> {
    let content = ContentRepository::new(state.pool());
    let posts = content.list_published_posts().await?;
    let cart_count = super::cart::session_cart(&session).await?.item_count();

    Ok(BlogIndexTemplate { posts, cart_count })
}

/// Display a single published post.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Path(slug): Path<String>,
) -> Result<BlogShowTemplate> {
    let content = ContentRepository::new(state.pool());
    let post = content
        .post_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {slug}")))?;
    let cart_count = super::cart::session_cart(&session).await?.item_count();

    Ok(BlogShowTemplate { post, cart_count })
}
