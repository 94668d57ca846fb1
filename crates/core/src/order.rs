//! Orders and order items.
//!
//! An order is created exactly once at checkout submission; afterwards only
//! its status moves, through the guarded transitions in
//! [`crate::types::OrderStatus`]. Items are denormalized snapshots of the
//! cart lines so historical orders stay stable when the catalog changes;
//! they are immutable after insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::checkout::ContactInfo;
use crate::types::{Money, OrderId, OrderItemId, OrderNumber, OrderStatus, PaymentMethod};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_note: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_screenshot_url: Option<String>,
    pub subtotal: Money,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A snapshot line on a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_name: String,
    pub product_image: Option<String>,
    pub variant_label: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

/// An order about to be inserted, before the database assigns ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_number: OrderNumber,
    pub customer: ContactInfo,
    pub customer_note: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_screenshot_url: Option<String>,
    pub subtotal: Money,
    pub total: Money,
    pub items: Vec<OrderItemDraft>,
}

/// A snapshot line about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemDraft {
    pub product_name: String,
    pub product_image: Option<String>,
    pub variant_label: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

impl OrderDraft {
    /// Snapshot a cart into an order draft.
    ///
    /// Subtotal equals total: this flow has no tax or shipping line.
    #[must_use]
    pub fn from_cart(
        cart: &Cart,
        order_number: OrderNumber,
        customer: ContactInfo,
        customer_note: Option<String>,
        payment_method: PaymentMethod,
        payment_screenshot_url: Option<String>,
    ) -> Self {
        let subtotal = cart.subtotal();
        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItemDraft {
                product_name: line.product.name.clone(),
                product_image: line.product.image_url.clone(),
                variant_label: line.variant.label(),
                quantity: line.quantity,
                unit_price: line.unit_price(),
                total_price: line.line_total(),
            })
            .collect();

        Self {
            order_number,
            customer,
            customer_note,
            payment_method,
            payment_screenshot_url,
            subtotal,
            total: subtotal,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ProductSnapshot;
    use crate::types::{CategoryId, ProductId, ProductKind};
    use crate::variant::{PlanChoice, Variant};

    fn cart_with_subscription() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            ProductSnapshot {
                id: ProductId::new(1),
                name: "Netflix".to_owned(),
                slug: "netflix".to_owned(),
                image_url: Some("/uploads/netflix.png".to_owned()),
                base_price: Money::from_rupees(399),
                original_price: None,
                kind: ProductKind::Subscription,
                category_id: Some(CategoryId::new(1)),
                category_name: Some("Streaming".to_owned()),
            },
            Variant::Subscription(PlanChoice {
                plan_name: "Premium".to_owned(),
                duration_label: "1 Month".to_owned(),
                price: Money::from_rupees(499),
            }),
            2,
        );
        cart
    }

    #[test]
    fn test_draft_snapshots_cart() {
        let cart = cart_with_subscription();
        let draft = OrderDraft::from_cart(
            &cart,
            OrderNumber::from_sequence(42),
            ContactInfo {
                name: "Sita Sharma".to_owned(),
                email: "sita@example.com".to_owned(),
                phone: "9841000000".to_owned(),
            },
            None,
            PaymentMethod::Esewa,
            Some("/uploads/proofs/a.png".to_owned()),
        );

        assert_eq!(draft.items.len(), 1);
        let item = draft.items.first().expect("one item");
        assert_eq!(item.product_name, "Netflix");
        assert_eq!(item.variant_label.as_deref(), Some("Premium / 1 Month"));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, Money::from_rupees(499));
        assert_eq!(item.total_price, Money::from_rupees(998));
    }

    #[test]
    fn test_subtotal_equals_total() {
        let cart = cart_with_subscription();
        let draft = OrderDraft::from_cart(
            &cart,
            OrderNumber::from_sequence(1),
            ContactInfo::default(),
            None,
            PaymentMethod::Khalti,
            None,
        );
        assert_eq!(draft.subtotal, draft.total);
        assert_eq!(draft.subtotal, Money::from_rupees(998));
    }
}
