//! The purchasable-variant sum type.
//!
//! A product is bought either plain, as a subscription plan + duration, or
//! as a gift-card denomination. The legacy data model expressed this as two
//! optional fields on a cart line, which admitted an ambiguous "both set"
//! state. Here the variant is a tagged union and pricing is one exhaustive
//! match; the ambiguity class is unrepresentable.

use serde::{Deserialize, Serialize};

use crate::types::Money;

/// A chosen subscription plan + duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanChoice {
    /// Plan display name, e.g. "Premium".
    pub plan_name: String,
    /// Duration display label, e.g. "1 Month".
    pub duration_label: String,
    /// Price of this plan for this duration.
    pub price: Money,
}

/// A chosen gift-card denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationChoice {
    /// Denomination display label, e.g. "Rs. 500".
    pub label: String,
    /// The face-value amount charged.
    pub amount: Money,
}

/// The specific purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variant {
    /// The plain product at its base price.
    Simple,
    /// A subscription plan + duration.
    Subscription(PlanChoice),
    /// A gift-card denomination.
    GiftCard(DenominationChoice),
}

impl Variant {
    /// The effective unit price of a line with this variant.
    ///
    /// Duration price for subscriptions, denomination amount for gift cards,
    /// base price otherwise.
    #[must_use]
    pub fn unit_price(&self, base_price: Money) -> Money {
        match self {
            Self::Simple => base_price,
            Self::Subscription(plan) => plan.price,
            Self::GiftCard(denom) => denom.amount,
        }
    }

    /// Convert from the legacy optional-field shape.
    ///
    /// When both a plan and a denomination are supplied (a state only a data
    /// bug can produce), the plan wins: the precedence contract is
    /// duration > denomination > base price.
    #[must_use]
    pub fn from_parts(plan: Option<PlanChoice>, denomination: Option<DenominationChoice>) -> Self {
        match (plan, denomination) {
            (Some(plan), _) => Self::Subscription(plan),
            (None, Some(denom)) => Self::GiftCard(denom),
            (None, None) => Self::Simple,
        }
    }

    /// Display label for order items and cart rows, `None` for plain lines.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Simple => None,
            Self::Subscription(plan) => {
                Some(format!("{} / {}", plan.plan_name, plan.duration_label))
            }
            Self::GiftCard(denom) => Some(denom.label.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premium_month() -> PlanChoice {
        PlanChoice {
            plan_name: "Premium".to_owned(),
            duration_label: "1 Month".to_owned(),
            price: Money::from_rupees(499),
        }
    }

    fn five_hundred() -> DenominationChoice {
        DenominationChoice {
            label: "Rs. 500".to_owned(),
            amount: Money::from_rupees(500),
        }
    }

    #[test]
    fn test_unit_price_simple_uses_base() {
        let base = Money::from_rupees(250);
        assert_eq!(Variant::Simple.unit_price(base), base);
    }

    #[test]
    fn test_unit_price_subscription_ignores_base() {
        let variant = Variant::Subscription(premium_month());
        assert_eq!(
            variant.unit_price(Money::from_rupees(9999)),
            Money::from_rupees(499)
        );
    }

    #[test]
    fn test_unit_price_gift_card_uses_denomination() {
        let variant = Variant::GiftCard(five_hundred());
        assert_eq!(
            variant.unit_price(Money::from_rupees(1)),
            Money::from_rupees(500)
        );
    }

    #[test]
    fn test_from_parts_duration_beats_denomination() {
        // Both set is a data bug; the plan must win.
        let variant = Variant::from_parts(Some(premium_month()), Some(five_hundred()));
        assert!(matches!(variant, Variant::Subscription(_)));
        assert_eq!(
            variant.unit_price(Money::from_rupees(0)),
            Money::from_rupees(499)
        );
    }

    #[test]
    fn test_from_parts_denomination_beats_base() {
        let variant = Variant::from_parts(None, Some(five_hundred()));
        assert!(matches!(variant, Variant::GiftCard(_)));
    }

    #[test]
    fn test_from_parts_neither_is_simple() {
        assert_eq!(Variant::from_parts(None, None), Variant::Simple);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Variant::Simple.label(), None);
        assert_eq!(
            Variant::Subscription(premium_month()).label().as_deref(),
            Some("Premium / 1 Month")
        );
        assert_eq!(
            Variant::GiftCard(five_hundred()).label().as_deref(),
            Some("Rs. 500")
        );
    }
}
