//! Seed the catalog from a YAML file.
//!
//! The file lists categories and products, with subscription plans and
//! gift card denominations inline:
//!
//! ```yaml
//! categories:
//!   - name: Streaming
//!     slug: streaming
//! products:
//!   - name: Netflix
//!     slug: netflix
//!     category: streaming
//!     kind: subscription
//!     base_price: 399
//!     published: true
//!     plans:
//!       - name: Premium
//!         durations:
//!           - { label: 1 Month, price: 499 }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// File could not be read.
    #[error("Failed to read {0}")]
    Read(String),

    /// YAML parse error.
    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Unknown category slug referenced by a product.
    #[error("Product {product} references unknown category {category}")]
    UnknownCategory { product: String, category: String },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    categories: Vec<SeedCategory>,
    #[serde(default)]
    products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
struct SeedCategory {
    name: String,
    slug: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    slug: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default = "default_kind")]
    kind: String,
    base_price: Decimal,
    #[serde(default)]
    original_price: Option<Decimal>,
    #[serde(default)]
    published: bool,
    #[serde(default)]
    plans: Vec<SeedPlan>,
    #[serde(default)]
    denominations: Vec<SeedDenomination>,
}

fn default_kind() -> String {
    "simple".to_owned()
}

#[derive(Debug, Deserialize)]
struct SeedPlan {
    name: String,
    durations: Vec<SeedDuration>,
}

#[derive(Debug, Deserialize)]
struct SeedDuration {
    label: String,
    price: Decimal,
}

#[derive(Debug, Deserialize)]
struct SeedDenomination {
    label: String,
    amount: Decimal,
}

/// Seed categories and products from a YAML file.
///
/// # Errors
///
/// Returns `SeedError` if the file is unreadable, malformed, or a
/// database operation fails.
pub async fn catalog(file_path: &str, clear_existing: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .map_err(|_| SeedError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    let path = Path::new(file_path);
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|_| SeedError::Read(file_path.to_owned()))?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    info!(
        categories = seed.categories.len(),
        products = seed.products.len(),
        "Parsed seed file"
    );

    let pool = PgPool::connect(&database_url).await?;
    let mut tx = pool.begin().await?;

    if clear_existing {
        info!("Clearing existing catalog");
        sqlx::query("DELETE FROM product").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM category").execute(&mut *tx).await?;
    }

    for category in &seed.categories {
        sqlx::query(
            "INSERT INTO category (name, slug, description) VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO UPDATE SET name = $1, description = $3",
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .execute(&mut *tx)
        .await?;
    }

    for product in &seed.products {
        let category_id: Option<i32> = match &product.category {
            Some(slug) => Some(
                sqlx::query_scalar("SELECT id FROM category WHERE slug = $1")
                    .bind(slug)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| SeedError::UnknownCategory {
                        product: product.name.clone(),
                        category: slug.clone(),
                    })?,
            ),
            None => None,
        };

        let product_id: i32 = sqlx::query_scalar(
            "INSERT INTO product \
             (name, slug, description, base_price, original_price, kind, category_id, published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (slug) DO UPDATE SET \
                 name = $1, description = $3, base_price = $4, original_price = $5, \
                 kind = $6, category_id = $7, published = $8 \
             RETURNING id",
        )
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.base_price)
        .bind(product.original_price)
        .bind(&product.kind)
        .bind(category_id)
        .bind(product.published)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM subscription_plan WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM denomination WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        for (plan_index, plan) in product.plans.iter().enumerate() {
            let plan_id: i32 = sqlx::query_scalar(
                "INSERT INTO subscription_plan (product_id, name, position) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(product_id)
            .bind(&plan.name)
            .bind(i32::try_from(plan_index).unwrap_or(i32::MAX))
            .fetch_one(&mut *tx)
            .await?;

            for (duration_index, duration) in plan.durations.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO plan_duration (plan_id, label, price, position) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(plan_id)
                .bind(&duration.label)
                .bind(duration.price)
                .bind(i32::try_from(duration_index).unwrap_or(i32::MAX))
                .execute(&mut *tx)
                .await?;
            }
        }

        for denomination in &product.denominations {
            sqlx::query(
                "INSERT INTO denomination (product_id, label, amount) VALUES ($1, $2, $3)",
            )
            .bind(product_id)
            .bind(&denomination.label)
            .bind(denomination.amount)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    info!("Catalog seeded");
    Ok(())
}
