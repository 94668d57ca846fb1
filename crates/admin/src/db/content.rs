//! Content write side: blog posts, hero slides and featured sections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use kinmel_core::{BlogPostId, FeaturedSectionId, HeroSlideId, ProductId};

use super::RepositoryError;
use super::crud::CrudStore;

// =============================================================================
// Blog posts
// =============================================================================

/// A blog post as the admin edits it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminBlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body_markdown: String,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a blog post. Publishing stamps
/// `published_at` on the first transition to published.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body_markdown: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

const BLOG_COLUMNS: &str =
    "id, title, slug, excerpt, body_markdown, cover_image_url, published, published_at";

/// CRUD store for blog posts.
#[derive(Clone)]
pub struct BlogPostStore {
    pool: PgPool,
}

impl BlogPostStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CrudStore for BlogPostStore {
    type Entity = AdminBlogPost;
    type Draft = BlogPostDraft;

    const RESOURCE: &'static str = "blog_post";

    async fn list(&self) -> Result<Vec<AdminBlogPost>, RepositoryError> {
        let query =
            format!("SELECT {BLOG_COLUMNS} FROM blog_post ORDER BY published_at DESC NULLS LAST");
        Ok(sqlx::query_as(&query).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<AdminBlogPost, RepositoryError> {
        let query = format!("SELECT {BLOG_COLUMNS} FROM blog_post WHERE id = $1");
        sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, draft: BlogPostDraft) -> Result<AdminBlogPost, RepositoryError> {
        let query = format!(
            "INSERT INTO blog_post \
             (title, slug, excerpt, body_markdown, cover_image_url, published, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $6 THEN NOW() END) \
             RETURNING {BLOG_COLUMNS}"
        );
        Ok(sqlx::query_as(&query)
            .bind(&draft.title)
            .bind(&draft.slug)
            .bind(&draft.excerpt)
            .bind(&draft.body_markdown)
            .bind(&draft.cover_image_url)
            .bind(draft.published)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i32, draft: BlogPostDraft) -> Result<AdminBlogPost, RepositoryError> {
        let query = format!(
            "UPDATE blog_post SET title = $2, slug = $3, excerpt = $4, body_markdown = $5, \
             cover_image_url = $6, published = $7, \
             published_at = CASE WHEN $7 THEN COALESCE(published_at, NOW()) END \
             WHERE id = $1 RETURNING {BLOG_COLUMNS}"
        );
        sqlx::query_as(&query)
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.slug)
            .bind(&draft.excerpt)
            .bind(&draft.body_markdown)
            .bind(&draft.cover_image_url)
            .bind(draft.published)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM blog_post WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Hero slides
// =============================================================================

/// A hero carousel slide.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminHeroSlide {
    pub id: HeroSlideId,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
}

/// Create/update payload for a hero slide.
#[derive(Debug, Clone, Deserialize)]
pub struct HeroSlideDraft {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    #[serde(default)]
    pub position: i32,
}

const SLIDE_COLUMNS: &str = "id, title, subtitle, image_url, link_url, position";

/// CRUD store for hero slides.
#[derive(Clone)]
pub struct HeroSlideStore {
    pool: PgPool,
}

impl HeroSlideStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CrudStore for HeroSlideStore {
    type Entity = AdminHeroSlide;
    type Draft = HeroSlideDraft;

    const RESOURCE: &'static str = "hero_slide";

    async fn list(&self) -> Result<Vec<AdminHeroSlide>, RepositoryError> {
        let query = format!("SELECT {SLIDE_COLUMNS} FROM hero_slide ORDER BY position");
        Ok(sqlx::query_as(&query).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<AdminHeroSlide, RepositoryError> {
        let query = format!("SELECT {SLIDE_COLUMNS} FROM hero_slide WHERE id = $1");
        sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, draft: HeroSlideDraft) -> Result<AdminHeroSlide, RepositoryError> {
        let query = format!(
            "INSERT INTO hero_slide (title, subtitle, image_url, link_url, position) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SLIDE_COLUMNS}"
        );
        Ok(sqlx::query_as(&query)
            .bind(&draft.title)
            .bind(&draft.subtitle)
            .bind(&draft.image_url)
            .bind(&draft.link_url)
            .bind(draft.position)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i32, draft: HeroSlideDraft) -> Result<AdminHeroSlide, RepositoryError> {
        let query = format!(
            "UPDATE hero_slide SET title = $2, subtitle = $3, image_url = $4, \
             link_url = $5, position = $6 WHERE id = $1 RETURNING {SLIDE_COLUMNS}"
        );
        sqlx::query_as(&query)
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.subtitle)
            .bind(&draft.image_url)
            .bind(&draft.link_url)
            .bind(draft.position)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hero_slide WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Featured sections
// =============================================================================

/// An admin-curated homepage placement.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminFeaturedSection {
    pub id: FeaturedSectionId,
    pub placement: String,
    pub heading: String,
    pub product_id: ProductId,
    pub accent_color: Option<String>,
    pub position: i32,
}

/// Create/update payload for a featured section.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedSectionDraft {
    pub placement: String,
    pub heading: String,
    pub product_id: ProductId,
    pub accent_color: Option<String>,
    #[serde(default)]
    pub position: i32,
}

const SECTION_COLUMNS: &str = "id, placement, heading, product_id, accent_color, position";

/// CRUD store for featured sections.
#[derive(Clone)]
pub struct FeaturedSectionStore {
    pool: PgPool,
}

impl FeaturedSectionStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CrudStore for FeaturedSectionStore {
    type Entity = AdminFeaturedSection;
    type Draft = FeaturedSectionDraft;

    const RESOURCE: &'static str = "featured_section";

    async fn list(&self) -> Result<Vec<AdminFeaturedSection>, RepositoryError> {
        let query =
            format!("SELECT {SECTION_COLUMNS} FROM featured_section ORDER BY placement, position");
        Ok(sqlx::query_as(&query).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<AdminFeaturedSection, RepositoryError> {
        let query = format!("SELECT {SECTION_COLUMNS} FROM featured_section WHERE id = $1");
        sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(
        &self,
        draft: FeaturedSectionDraft,
    ) -> Result<AdminFeaturedSection, RepositoryError> {
        let query = format!(
            "INSERT INTO featured_section (placement, heading, product_id, accent_color, position) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SECTION_COLUMNS}"
        );
        Ok(sqlx::query_as(&query)
            .bind(&draft.placement)
            .bind(&draft.heading)
            .bind(draft.product_id)
            .bind(&draft.accent_color)
            .bind(draft.position)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(
        &self,
        id: i32,
        draft: FeaturedSectionDraft,
    ) -> Result<AdminFeaturedSection, RepositoryError> {
        let query = format!(
            "UPDATE featured_section SET placement = $2, heading = $3, product_id = $4, \
             accent_color = $5, position = $6 WHERE id = $1 RETURNING {SECTION_COLUMNS}"
        );
        sqlx::query_as(&query)
            .bind(id)
            .bind(&draft.placement)
            .bind(&draft.heading)
            .bind(draft.product_id)
            .bind(&draft.accent_color)
            .bind(draft.position)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM featured_section WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
