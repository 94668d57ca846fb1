//! Content entities: blog posts, hero slides and featured sections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kinmel_core::{BlogPostId, FeaturedSectionId, HeroSlideId, ProductId};

/// A blog post. The body is Markdown, rendered with comrak at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body_markdown: String,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// A hero carousel slide on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub id: HeroSlideId,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
}

/// An admin-curated homepage placement pointing at a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedSection {
    pub id: FeaturedSectionId,
    /// Placement slot, e.g. "deal_of_the_day" or "weekly_pick".
    pub placement: String,
    pub heading: String,
    pub product_id: ProductId,
    pub accent_color: Option<String>,
    pub position: i32,
}

/// Everything the home page needs, fetched in one pass and cached briefly.
#[derive(Debug, Clone)]
pub struct HomeContent {
    pub slides: Vec<HeroSlide>,
    pub sections: Vec<FeaturedSection>,
    pub latest_products: Vec<crate::models::catalog::Product>,
    pub latest_posts: Vec<BlogPost>,
}
