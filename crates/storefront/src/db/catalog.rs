//! Catalog repository: categories, products and variant sub-entities.

use sqlx::PgPool;

use kinmel_core::{CategoryId, DenominationId, DurationId, Money, PlanId, ProductId, ProductKind};

use super::RepositoryError;
use crate::models::catalog::{
    Category, Denomination, Faq, PlanDuration, Product, SubscriptionPlan,
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    slug: String,
    description: Option<String>,
    image_url: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    slug: String,
    description: Option<String>,
    image_url: Option<String>,
    base_price: Money,
    original_price: Option<Money>,
    kind: ProductKind,
    category_id: Option<CategoryId>,
    category_name: Option<String>,
    published: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ProductRow {
    /// Convert into a domain product with empty sub-entity collections;
    /// the repository fills them in for detail queries.
    fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            image_url: self.image_url,
            base_price: self.base_price,
            original_price: self.original_price,
            kind: self.kind,
            category_id: self.category_id,
            category_name: self.category_name,
            plans: Vec::new(),
            denominations: Vec::new(),
            faqs: Vec::new(),
            tags: Vec::new(),
            published: self.published,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DurationRow {
    plan_id: PlanId,
    plan_name: String,
    id: DurationId,
    label: String,
    price: Money,
}

#[derive(Debug, sqlx::FromRow)]
struct DenominationRow {
    id: DenominationId,
    product_id: ProductId,
    label: String,
    amount: Money,
}

#[derive(Debug, sqlx::FromRow)]
struct FaqRow {
    question: String,
    answer: String,
}

const PRODUCT_COLUMNS: &str = r"
    p.id, p.name, p.slug, p.description, p.image_url,
    p.base_price, p.original_price, p.kind, p.category_id,
    c.name AS category_name, p.published, p.created_at
";

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, image_url FROM category ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Look up a category by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, image_url FROM category WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// All published products, newest first. Sub-entities are not loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<Product>, RepositoryError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM product p \
             LEFT JOIN category c ON c.id = p.category_id \
             WHERE p.published ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    /// Published products within a category, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_in_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM product p \
             LEFT JOIN category c ON c.id = p.category_id \
             WHERE p.published AND p.category_id = $1 ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(category_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    /// A published product by slug, with plans, durations, denominations,
    /// FAQs and tags loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM product p \
             LEFT JOIN category c ON c.id = p.category_id \
             WHERE p.published AND p.slug = $1"
        );
        let Some(row) = sqlx::query_as::<_, ProductRow>(&query)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?
        else {
            return Ok(None);
        };

        let product = self.load_sub_entities(row.into_product()).await?;
        Ok(Some(product))
    }

    /// A product by id, with sub-entities loaded. Used when a cart line is
    /// being built from form input.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM product p \
             LEFT JOIN category c ON c.id = p.category_id \
             WHERE p.id = $1"
        );
        let Some(row) = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
        else {
            return Ok(None);
        };

        let product = self.load_sub_entities(row.into_product()).await?;
        Ok(Some(product))
    }

    async fn load_sub_entities(&self, mut product: Product) -> Result<Product, RepositoryError> {
        let durations = sqlx::query_as::<_, DurationRow>(
            "SELECT sp.id AS plan_id, sp.name AS plan_name, pd.id, pd.label, pd.price \
             FROM subscription_plan sp \
             JOIN plan_duration pd ON pd.plan_id = sp.id \
             WHERE sp.product_id = $1 \
             ORDER BY sp.position, pd.position",
        )
        .bind(product.id)
        .fetch_all(self.pool)
        .await?;

        let mut plans: Vec<SubscriptionPlan> = Vec::new();
        for row in durations {
            let duration = PlanDuration {
                id: row.id,
                plan_id: row.plan_id,
                label: row.label,
                price: row.price,
            };
            match plans.iter_mut().find(|p| p.id == row.plan_id) {
                Some(plan) => plan.durations.push(duration),
                None => plans.push(SubscriptionPlan {
                    id: row.plan_id,
                    product_id: product.id,
                    name: row.plan_name,
                    durations: vec![duration],
                }),
            }
        }
        product.plans = plans;

        let denominations = sqlx::query_as::<_, DenominationRow>(
            "SELECT id, product_id, label, amount FROM denomination \
             WHERE product_id = $1 ORDER BY amount",
        )
        .bind(product.id)
        .fetch_all(self.pool)
        .await?;
        product.denominations = denominations
            .into_iter()
            .map(|row| Denomination {
                id: row.id,
                product_id: row.product_id,
                label: row.label,
                amount: row.amount,
            })
            .collect();

        let faqs = sqlx::query_as::<_, FaqRow>(
            "SELECT question, answer FROM product_faq WHERE product_id = $1 ORDER BY position",
        )
        .bind(product.id)
        .fetch_all(self.pool)
        .await?;
        product.faqs = faqs
            .into_iter()
            .map(|row| Faq {
                question: row.question,
                answer: row.answer,
            })
            .collect();

        let tags: Vec<(String,)> =
            sqlx::query_as("SELECT tag FROM product_tag WHERE product_id = $1 ORDER BY tag")
                .bind(product.id)
                .fetch_all(self.pool)
                .await?;
        product.tags = tags.into_iter().map(|(tag,)| tag).collect();

        Ok(product)
    }
}
