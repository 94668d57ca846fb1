//! The shopper's cart.
//!
//! The cart is private to one session and single-writer; it is serialized
//! into the tower-sessions store between requests. Lines carry a
//! denormalized product snapshot so cart rendering never needs a catalog
//! round-trip and order items stay stable if the catalog later changes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CategoryId, Money, ProductId, ProductKind};
use crate::variant::Variant;

/// Denormalized snapshot of a product at the moment it entered the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub base_price: Money,
    /// Struck-through compare-at price, when the product is on offer.
    pub original_price: Option<Money>,
    pub kind: ProductKind,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
}

/// One line in the cart: a product, the chosen variant, and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: Uuid,
    pub product: ProductSnapshot,
    pub variant: Variant,
    pub quantity: u32,
}

impl CartLine {
    /// Effective unit price for this line's variant.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.variant.unit_price(self.product.base_price)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price().times(self.quantity)
    }
}

/// The cart: an ordered collection of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add a product to the cart, merging into an existing line when the
    /// same product + variant is already present.
    ///
    /// Returns `false` (without modifying the cart) when the quantity is
    /// zero or the effective unit price is not positive, so the caller can
    /// decide whether to show a confirmation. This mirrors the flag-based
    /// contract of the original flow rather than raising an error.
    pub fn add(&mut self, product: ProductSnapshot, variant: Variant, quantity: u32) -> bool {
        if quantity == 0 || !variant.unit_price(product.base_price).is_positive() {
            return false;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product.id && l.variant == variant)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                id: Uuid::new_v4(),
                product,
                variant,
                quantity,
            });
        }
        true
    }

    /// Set the quantity of a line. A quantity of zero removes the line;
    /// negative quantities are unrepresentable. Unknown line ids are ignored.
    pub fn update_quantity(&mut self, line_id: Uuid, quantity: u32) {
        if quantity == 0 {
            self.remove(line_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove(&mut self, line_id: Uuid) {
        self.lines.retain(|l| l.id != line_id);
    }

    /// Empty the cart. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Find a line by id.
    #[must_use]
    pub fn find(&self, line_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Sum of effective unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::variant::{DenominationChoice, PlanChoice};

    fn netflix() -> ProductSnapshot {
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
        }
    }

    fn steam_card() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(2),
            name: "Steam Gift Card".to_owned(),
            slug: "steam-gift-card".to_owned(),
            image_url: None,
            base_price: Money::ZERO,
            original_price: None,
            kind: ProductKind::GiftCard,
            category_id: None,
            category_name: None,
        }
    }

    fn premium_month() -> Variant {
        Variant::Subscription(PlanChoice {
            plan_name: "Premium".to_owned(),
            duration_label: "1 Month".to_owned(),
            price: Money::from_rupees(499),
        })
    }

    #[test]
    fn test_add_and_subtotal() {
        let mut cart = Cart::new();
        assert!(cart.add(netflix(), premium_month(), 2));
        assert_eq!(cart.subtotal(), Money::from_rupees(998));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_merges_same_variant() {
        let mut cart = Cart::new();
        assert!(cart.add(netflix(), premium_month(), 1));
        assert!(cart.add(netflix(), premium_month(), 2));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_distinct_variants_get_distinct_lines() {
        let mut cart = Cart::new();
        assert!(cart.add(netflix(), premium_month(), 1));
        assert!(cart.add(netflix(), Variant::Simple, 1));
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_add_zero_quantity_rejected() {
        let mut cart = Cart::new();
        assert!(!cart.add(netflix(), premium_month(), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_unpriceable_line_rejected() {
        // A gift card without a denomination has no positive price.
        let mut cart = Cart::new();
        assert!(!cart.add(steam_card(), Variant::Simple, 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_gift_card_priced_by_denomination() {
        let mut cart = Cart::new();
        let denom = Variant::GiftCard(DenominationChoice {
            label: "Rs. 1000".to_owned(),
            amount: Money::from_rupees(1000),
        });
        assert!(cart.add(steam_card(), denom, 1));
        assert_eq!(cart.subtotal(), Money::from_rupees(1000));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(netflix(), premium_month(), 1);
        let id = cart.lines()[0].id;

        cart.update_quantity(id, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(netflix(), premium_month(), 2);
        let id = cart.lines()[0].id;

        cart.update_quantity(id, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_clear_idempotent() {
        let mut cart = Cart::new();
        cart.add(netflix(), premium_month(), 1);
        let id = cart.lines()[0].id;

        cart.remove(id);
        cart.remove(id);
        assert!(cart.is_empty());

        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::ZERO);
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(netflix(), premium_month(), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
        assert_eq!(back.subtotal(), Money::from_rupees(998));
    }
}
