//! Cart behavior across a whole shopping session.

use kinmel_core::{
    Cart, CategoryId, DenominationChoice, Money, PlanChoice, ProductId, ProductKind,
    ProductSnapshot, Variant,
};

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
        name: "Steam Wallet".to_owned(),
        slug: "steam-wallet".to_owned(),
        image_url: None,
        base_price: Money::from_rupees(0),
        original_price: None,
        kind: ProductKind::GiftCard,
        category_id: None,
        category_name: None,
    }
}

fn premium_monthly() -> Variant {
    Variant::Subscription(PlanChoice {
        plan_name: "Premium".to_owned(),
        duration_label: "1 Month".to_owned(),
        price: Money::from_rupees(499),
    })
}

fn rs_1000_card() -> Variant {
    Variant::GiftCard(DenominationChoice {
        label: "Rs. 1000".to_owned(),
        amount: Money::from_rupees(1000),
    })
}

#[test]
fn same_variant_merges_into_one_line() {
    let mut cart = Cart::new();
    assert!(cart.add(netflix(), premium_monthly(), 1));
    assert!(cart.add(netflix(), premium_monthly(), 2));

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), Money::from_rupees(1497));
}

#[test]
fn different_variants_of_one_product_stay_separate() {
    let annual = Variant::Subscription(PlanChoice {
        plan_name: "Premium".to_owned(),
        duration_label: "12 Months".to_owned(),
        price: Money::from_rupees(4999),
    });

    let mut cart = Cart::new();
    assert!(cart.add(netflix(), premium_monthly(), 1));
    assert!(cart.add(netflix(), annual, 1));

    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.subtotal(), Money::from_rupees(5498));
}

#[test]
fn mixed_cart_subtotal_uses_variant_prices() {
    let mut cart = Cart::new();
    assert!(cart.add(netflix(), premium_monthly(), 2));
    assert!(cart.add(steam_card(), rs_1000_card(), 1));

    assert_eq!(cart.subtotal(), Money::from_rupees(1998));
}

#[test]
fn quantity_zero_removes_the_line() {
    let mut cart = Cart::new();
    assert!(cart.add(netflix(), premium_monthly(), 2));
    let line_id = cart.lines()[0].id;

    cart.update_quantity(line_id, 0);

    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), Money::ZERO);
}

#[test]
fn gift_card_without_denomination_cannot_be_added() {
    // base price 0 and Simple variant means no positive unit price
    let mut cart = Cart::new();
    assert!(!cart.add(steam_card(), Variant::Simple, 1));
    assert!(cart.is_empty());
}

#[test]
fn removing_one_line_keeps_the_rest() {
    let mut cart = Cart::new();
    assert!(cart.add(netflix(), premium_monthly(), 1));
    assert!(cart.add(steam_card(), rs_1000_card(), 1));
    let first = cart.lines()[0].id;

    cart.remove(first);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].product.name, "Steam Wallet");
}
