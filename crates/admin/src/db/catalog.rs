//! Catalog write side: categories and products with their variant
//! sub-entities.
//!
//! Product updates replace the sub-entity rows (plans, durations,
//! denominations, FAQs, tags) wholesale inside one transaction; the
//! storefront only ever sees a consistent set.

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use kinmel_core::{CategoryId, DenominationId, DurationId, Money, PlanId, ProductId, ProductKind};

use super::RepositoryError;
use super::crud::CrudStore;

// =============================================================================
// Categories
// =============================================================================

/// A category as the admin sees it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminCategory {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Create/update payload for a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// CRUD store for categories.
#[derive(Clone)]
pub struct CategoryStore {
    pool: PgPool,
}

impl CategoryStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CATEGORY_COLUMNS: &str = "id, name, slug, description, image_url";

impl CrudStore for CategoryStore {
    type Entity = AdminCategory;
    type Draft = CategoryDraft;

    const RESOURCE: &'static str = "category";

    async fn list(&self) -> Result<Vec<AdminCategory>, RepositoryError> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM category ORDER BY name");
        Ok(sqlx::query_as(&query).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<AdminCategory, RepositoryError> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE id = $1");
        sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, draft: CategoryDraft) -> Result<AdminCategory, RepositoryError> {
        let query = format!(
            "INSERT INTO category (name, slug, description, image_url) \
             VALUES ($1, $2, $3, $4) RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as(&query)
            .bind(&draft.name)
            .bind(&draft.slug)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(slug_conflict(&draft.slug))
    }

    async fn update(&self, id: i32, draft: CategoryDraft) -> Result<AdminCategory, RepositoryError> {
        let query = format!(
            "UPDATE category SET name = $2, slug = $3, description = $4, image_url = $5 \
             WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.slug)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(slug_conflict(&draft.slug))?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Map a unique violation on a slug column to a conflict error.
fn slug_conflict(slug: &str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    let slug = slug.to_owned();
    move |err| match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(format!("slug {slug} already in use"))
        }
        _ => RepositoryError::Database(err),
    }
}

// =============================================================================
// Products
// =============================================================================

/// A product with its sub-entities, as the admin edits it.
#[derive(Debug, Clone, Serialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: Money,
    pub original_price: Option<Money>,
    pub kind: ProductKind,
    pub category_id: Option<CategoryId>,
    pub published: bool,
    pub plans: Vec<AdminPlan>,
    pub denominations: Vec<AdminDenomination>,
    pub faqs: Vec<FaqDraft>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminPlan {
    pub id: PlanId,
    pub name: String,
    pub durations: Vec<AdminDuration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDuration {
    pub id: DurationId,
    pub label: String,
    pub price: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDenomination {
    pub id: DenominationId,
    pub label: String,
    pub amount: Money,
}

/// Create/update payload for a product. Sub-entity lists replace whatever
/// is currently stored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: Money,
    pub original_price: Option<Money>,
    #[serde(default)]
    pub kind: ProductKind,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub plans: Vec<PlanDraft>,
    #[serde(default)]
    pub denominations: Vec<DenominationDraft>,
    #[serde(default)]
    pub faqs: Vec<FaqDraft>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanDraft {
    pub name: String,
    pub durations: Vec<DurationDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DurationDraft {
    pub label: String,
    pub price: Money,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DenominationDraft {
    pub label: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
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
    published: bool,
}

const PRODUCT_COLUMNS: &str = r"
    id, name, slug, description, image_url, base_price, original_price,
    kind, category_id, published
";

/// CRUD store for products.
#[derive(Clone)]
pub struct ProductStore {
    pool: PgPool,
}

impl ProductStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assemble(&self, row: ProductRow) -> Result<AdminProduct, RepositoryError> {
        // LEFT JOIN so a plan saved without durations still comes back.
        let plan_rows: Vec<PlanDurationRow> = sqlx::query_as(
            "SELECT sp.id, sp.name, pd.id, pd.label, pd.price \
             FROM subscription_plan sp \
             LEFT JOIN plan_duration pd ON pd.plan_id = sp.id \
             WHERE sp.product_id = $1 ORDER BY sp.position, pd.position",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        let plans = group_plans(plan_rows);

        let denominations: Vec<(DenominationId, String, Money)> = sqlx::query_as(
            "SELECT id, label, amount FROM denomination WHERE product_id = $1 ORDER BY amount",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        let faqs: Vec<FaqDraft> = sqlx::query_as(
            "SELECT question, answer FROM product_faq WHERE product_id = $1 ORDER BY position",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        let tags: Vec<(String,)> =
            sqlx::query_as("SELECT tag FROM product_tag WHERE product_id = $1 ORDER BY tag")
                .bind(row.id)
                .fetch_all(&self.pool)
                .await?;

        Ok(AdminProduct {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            image_url: row.image_url,
            base_price: row.base_price,
            original_price: row.original_price,
            kind: row.kind,
            category_id: row.category_id,
            published: row.published,
            plans,
            denominations: denominations
                .into_iter()
                .map(|(id, label, amount)| AdminDenomination { id, label, amount })
                .collect(),
            faqs,
            tags: tags.into_iter().map(|(tag,)| tag).collect(),
        })
    }

    async fn replace_sub_entities(
        tx: &mut Transaction<'_, Postgres>,
        product_id: ProductId,
        draft: &ProductDraft,
    ) -> Result<(), RepositoryError> {
        // plan_duration rows go with their plans via ON DELETE CASCADE
        sqlx::query("DELETE FROM subscription_plan WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM denomination WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM product_faq WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM product_tag WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;

        for (plan_position, plan) in draft.plans.iter().enumerate() {
            let (plan_id,): (PlanId,) = sqlx::query_as(
                "INSERT INTO subscription_plan (product_id, name, position) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(product_id)
            .bind(&plan.name)
            .bind(position(plan_position)?)
            .fetch_one(&mut **tx)
            .await?;

            for (duration_position, duration) in plan.durations.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO plan_duration (plan_id, label, price, position) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(plan_id)
                .bind(&duration.label)
                .bind(duration.price)
                .bind(position(duration_position)?)
                .execute(&mut **tx)
                .await?;
            }
        }

        for denomination in &draft.denominations {
            sqlx::query("INSERT INTO denomination (product_id, label, amount) VALUES ($1, $2, $3)")
                .bind(product_id)
                .bind(&denomination.label)
                .bind(denomination.amount)
                .execute(&mut **tx)
                .await?;
        }

        for (faq_position, faq) in draft.faqs.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_faq (product_id, question, answer, position) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(product_id)
            .bind(&faq.question)
            .bind(&faq.answer)
            .bind(position(faq_position)?)
            .execute(&mut **tx)
            .await?;
        }

        for tag in &draft.tags {
            sqlx::query("INSERT INTO product_tag (product_id, tag) VALUES ($1, $2)")
                .bind(product_id)
                .bind(tag)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

fn position(index: usize) -> Result<i32, RepositoryError> {
    i32::try_from(index)
        .map_err(|_| RepositoryError::DataCorruption(format!("position {index} out of range")))
}

/// One row of the plan/duration join; duration columns are NULL for a plan
/// with no durations yet.
type PlanDurationRow = (PlanId, String, Option<DurationId>, Option<String>, Option<Money>);

fn group_plans(rows: Vec<PlanDurationRow>) -> Vec<AdminPlan> {
    let mut plans: Vec<AdminPlan> = Vec::new();
    for (plan_id, plan_name, duration_id, label, price) in rows {
        let idx = match plans.iter().position(|p| p.id == plan_id) {
            Some(idx) => idx,
            None => {
                plans.push(AdminPlan {
                    id: plan_id,
                    name: plan_name,
                    durations: Vec::new(),
                });
                plans.len() - 1
            }
        };
        if let (Some(id), Some(label), Some(price)) = (duration_id, label, price) {
            plans[idx].durations.push(AdminDuration { id, label, price });
        }
    }
    plans
}

impl CrudStore for ProductStore {
    type Entity = AdminProduct;
    type Draft = ProductDraft;

    const RESOURCE: &'static str = "product";

    async fn list(&self) -> Result<Vec<AdminProduct>, RepositoryError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            products.push(self.assemble(row).await?);
        }
        Ok(products)
    }

    async fn get(&self, id: i32) -> Result<AdminProduct, RepositoryError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        self.assemble(row).await
    }

    async fn create(&self, draft: ProductDraft) -> Result<AdminProduct, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "INSERT INTO product \
             (name, slug, description, image_url, base_price, original_price, \
              kind, category_id, published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(&draft.name)
            .bind(&draft.slug)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .bind(draft.base_price)
            .bind(draft.original_price)
            .bind(draft.kind)
            .bind(draft.category_id)
            .bind(draft.published)
            .fetch_one(&mut *tx)
            .await
            .map_err(slug_conflict(&draft.slug))?;

        Self::replace_sub_entities(&mut tx, row.id, &draft).await?;
        tx.commit().await?;

        self.get(row.id.as_i32()).await
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> Result<AdminProduct, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "UPDATE product SET name = $2, slug = $3, description = $4, image_url = $5, \
             base_price = $6, original_price = $7, kind = $8, category_id = $9, \
             published = $10 \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.slug)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .bind(draft.base_price)
            .bind(draft.original_price)
            .bind(draft.kind)
            .bind(draft.category_id)
            .bind(draft.published)
            .fetch_optional(&mut *tx)
            .await
            .map_err(slug_conflict(&draft.slug))?
            .ok_or(RepositoryError::NotFound)?;

        Self::replace_sub_entities(&mut tx, row.id, &draft).await?;
        tx.commit().await?;

        self.get(id).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duration_row(plan: i32, name: &str, duration: i32, label: &str, rupees: i64) -> PlanDurationRow {
        (
            PlanId::new(plan),
            name.to_owned(),
            Some(DurationId::new(duration)),
            Some(label.to_owned()),
            Some(Money::from_rupees(rupees)),
        )
    }

    #[test]
    fn test_group_plans_keeps_join_order() {
        let plans = group_plans(vec![
            duration_row(1, "Basic", 10, "1 Month", 199),
            duration_row(1, "Basic", 11, "3 Months", 549),
            duration_row(2, "Premium", 12, "1 Month", 499),
        ]);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "Basic");
        assert_eq!(plans[0].durations.len(), 2);
        assert_eq!(plans[1].durations[0].label, "1 Month");
    }

    #[test]
    fn test_group_plans_keeps_plan_without_durations() {
        // A freshly created plan has no duration rows yet; it must still
        // round-trip through create/get.
        let plans = group_plans(vec![
            (PlanId::new(1), "Standard".to_owned(), None, None, None),
            duration_row(2, "Premium", 12, "1 Month", 499),
        ]);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "Standard");
        assert!(plans[0].durations.is_empty());
        assert_eq!(plans[1].durations.len(), 1);
    }
}
