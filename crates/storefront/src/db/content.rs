//! Content repository: blog posts, hero slides and featured sections.

use sqlx::PgPool;

use kinmel_core::{BlogPostId, FeaturedSectionId, HeroSlideId, ProductId};

use super::RepositoryError;
use crate::models::content::{BlogPost, FeaturedSection, HeroSlide};

#[derive(Debug, sqlx::FromRow)]
struct BlogPostRow {
    id: BlogPostId,
    title: String,
    slug: String,
    excerpt: Option<String>,
    body_markdown: String,
    cover_image_url: Option<String>,
    published: bool,
    published_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            body_markdown: row.body_markdown,
            cover_image_url: row.cover_image_url,
            published: row.published,
            published_at: row.published_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HeroSlideRow {
    id: HeroSlideId,
    title: String,
    subtitle: Option<String>,
    image_url: String,
    link_url: Option<String>,
    position: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct FeaturedSectionRow {
    id: FeaturedSectionId,
    placement: String,
    heading: String,
    product_id: ProductId,
    accent_color: Option<String>,
    position: i32,
}

const BLOG_COLUMNS: &str =
    "id, title, slug, excerpt, body_markdown, cover_image_url, published, published_at";

/// Repository for storefront content reads.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published blog posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published_posts(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let query = format!(
            "SELECT {BLOG_COLUMNS} FROM blog_post \
             WHERE published ORDER BY published_at DESC NULLS LAST"
        );
        let rows = sqlx::query_as::<_, BlogPostRow>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// A published post by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepositoryError> {
        let query = format!("SELECT {BLOG_COLUMNS} FROM blog_post WHERE published AND slug = $1");
        let row = sqlx::query_as::<_, BlogPostRow>(&query)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Hero slides in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn hero_slides(&self) -> Result<Vec<HeroSlide>, RepositoryError> {
        let rows = sqlx::query_as::<_, HeroSlideRow>(
            "SELECT id, title, subtitle, image_url, link_url, position \
             FROM hero_slide ORDER BY position",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| HeroSlide {
                id: row.id,
                title: row.title,
                subtitle: row.subtitle,
                image_url: row.image_url,
                link_url: row.link_url,
                position: row.position,
            })
            .collect())
    }

    /// Featured sections in display order, all placements.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured_sections(&self) -> Result<Vec<FeaturedSection>, RepositoryError> {
        let rows = sqlx::query_as::<_, FeaturedSectionRow>(
            "SELECT id, placement, heading, product_id, accent_color, position \
             FROM featured_section ORDER BY placement, position",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FeaturedSection {
                id: row.id,
                placement: row.placement,
                heading: row.heading,
                product_id: row.product_id,
                accent_color: row.accent_color,
                position: row.position,
            })
            .collect())
    }
}
