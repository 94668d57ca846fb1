//! Catalog entities: categories, products and their variant sub-entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kinmel_core::{
    CategoryId, DenominationId, DurationId, Money, PlanId, ProductId, ProductKind, ProductSnapshot,
};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// A catalog product with its variant sub-entities loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: Money,
    /// Struck-through compare-at price, when on offer.
    pub original_price: Option<Money>,
    pub kind: ProductKind,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub plans: Vec<SubscriptionPlan>,
    pub denominations: Vec<Denomination>,
    pub faqs: Vec<Faq>,
    pub tags: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// A subscription plan; belongs to a product, owns its durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub product_id: ProductId,
    pub name: String,
    pub durations: Vec<PlanDuration>,
}

/// A purchasable duration of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDuration {
    pub id: DurationId,
    pub plan_id: PlanId,
    pub label: String,
    pub price: Money,
}

/// A fixed face-value amount for a gift-card product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denomination {
    pub id: DenominationId,
    pub product_id: ProductId,
    pub label: String,
    pub amount: Money,
}

/// A product FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl Product {
    /// The denormalized snapshot that goes into a cart line.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            image_url: self.image_url.clone(),
            base_price: self.base_price,
            original_price: self.original_price,
            kind: self.kind,
            category_id: self.category_id,
            category_name: self.category_name.clone(),
        }
    }

    /// Find a duration (with its plan) by id.
    #[must_use]
    pub fn find_duration(&self, duration_id: DurationId) -> Option<(&SubscriptionPlan, &PlanDuration)> {
        self.plans.iter().find_map(|plan| {
            plan.durations
                .iter()
                .find(|d| d.id == duration_id)
                .map(|d| (plan, d))
        })
    }

    /// Find a denomination by id.
    #[must_use]
    pub fn find_denomination(&self, denomination_id: DenominationId) -> Option<&Denomination> {
        self.denominations.iter().find(|d| d.id == denomination_id)
    }
}
