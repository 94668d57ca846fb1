//! End-to-end checkout: wizard walk plus order placement against an
//! in-memory order store.

use std::sync::{Arc, Mutex};

use kinmel_core::{
    Cart, CheckoutForm, CheckoutStep, ContactInfo, Money, Order, OrderDraft, OrderId, OrderNumber,
    OrderStatus, PaymentMethod, PaymentProof, PlanChoice, ProductId, ProductKind, ProductSnapshot,
    StepError, Variant,
};
use kinmel_storefront::db::RepositoryError;
use kinmel_storefront::services::{CheckoutService, OrderStore, PlaceOrderError};

fn spotify() -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(7),
        name: "Spotify".to_owned(),
        slug: "spotify".to_owned(),
        image_url: None,
        base_price: Money::from_rupees(449),
        original_price: Some(Money::from_rupees(599)),
        kind: ProductKind::Subscription,
        category_id: None,
        category_name: None,
    }
}

fn duo_plan() -> Variant {
    Variant::Subscription(PlanChoice {
        plan_name: "Duo".to_owned(),
        duration_label: "3 Months".to_owned(),
        price: Money::from_rupees(1299),
    })
}

fn contact() -> ContactInfo {
    ContactInfo {
        name: "Ram Thapa".to_owned(),
        email: "ram@example.com".to_owned(),
        phone: "9801234567".to_owned(),
    }
}

/// Order store that records drafts and hands out sequential numbers.
/// Clones share state so a test can inspect what the service placed.
#[derive(Default, Clone)]
struct MemoryOrderStore {
    seq: Arc<Mutex<i64>>,
    placed: Arc<Mutex<Vec<OrderDraft>>>,
}

impl OrderStore for MemoryOrderStore {
    async fn next_order_number(&self) -> Result<OrderNumber, RepositoryError> {
        let mut seq = self.seq.lock().unwrap();
        *seq += 1;
        Ok(OrderNumber::from_sequence(*seq))
    }

    async fn create_with_items(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        self.placed.lock().unwrap().push(draft.clone());
        Ok(Order {
            id: OrderId::new(1),
            order_number: draft.order_number.clone(),
            status: OrderStatus::Pending,
            customer_name: draft.customer.name.clone(),
            customer_email: draft.customer.email.clone(),
            customer_phone: draft.customer.phone.clone(),
            customer_note: draft.customer_note.clone(),
            payment_method: draft.payment_method,
            payment_screenshot_url: draft.payment_screenshot_url.clone(),
            subtotal: draft.subtotal,
            total: draft.total,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        })
    }
}

#[test]
fn wizard_gates_each_forward_step() {
    let mut form = CheckoutForm::default();

    // Cannot leave Information until contact details are complete
    assert_eq!(
        form.advance(CheckoutStep::Information),
        Err(StepError::IncompleteContact)
    );

    form.contact = contact();
    assert_eq!(
        form.advance(CheckoutStep::Information),
        Ok(CheckoutStep::Payment)
    );

    // Payment step requires a method
    assert_eq!(
        form.advance(CheckoutStep::Payment),
        Err(StepError::NoPaymentMethod)
    );
    form.payment_method = Some(PaymentMethod::Khalti);
    assert_eq!(
        form.advance(CheckoutStep::Payment),
        Ok(CheckoutStep::Confirm)
    );

    // Confirm requires the payment proof screenshot
    assert_eq!(
        form.advance(CheckoutStep::Confirm),
        Err(StepError::NoPaymentProof)
    );
    form.proof = Some(PaymentProof {
        url: "/uploads/proof-1.png".to_owned(),
    });
    assert_eq!(form.advance(CheckoutStep::Confirm), Ok(CheckoutStep::Placed));
}

#[test]
fn back_never_loses_entered_values() {
    let mut form = CheckoutForm::default();
    form.contact = contact();
    form.payment_method = Some(PaymentMethod::Esewa);

    let step = CheckoutStep::Confirm.back();
    assert_eq!(step, CheckoutStep::Payment);
    assert_eq!(step.back(), CheckoutStep::Information);

    assert_eq!(form.payment_method, Some(PaymentMethod::Esewa));
    assert!(form.information_valid());
}

#[tokio::test]
async fn completed_wizard_places_an_order() {
    let mut cart = Cart::new();
    assert!(cart.add(spotify(), duo_plan(), 1));

    let form = CheckoutForm {
        contact: contact(),
        payment_method: Some(PaymentMethod::Connectips),
        proof: Some(PaymentProof {
            url: "/uploads/proof-2.png".to_owned(),
        }),
    };

    let store = MemoryOrderStore::default();
    let service = CheckoutService::new(store);
    let order = service
        .place_order(&cart, &form, Some("deliver after 5pm".to_owned()))
        .await
        .unwrap();

    assert_eq!(order.order_number.to_string(), "KM-000001");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, Money::from_rupees(1299));
    assert_eq!(order.customer_note.as_deref(), Some("deliver after 5pm"));
    assert_eq!(order.payment_method, PaymentMethod::Connectips);
}

#[tokio::test]
async fn placement_requires_a_complete_wizard() {
    let mut cart = Cart::new();
    assert!(cart.add(spotify(), duo_plan(), 1));

    let form = CheckoutForm {
        contact: contact(),
        payment_method: None,
        proof: None,
    };

    let service = CheckoutService::new(MemoryOrderStore::default());
    let err = service.place_order(&cart, &form, None).await.unwrap_err();
    assert!(matches!(
        err,
        PlaceOrderError::Step(StepError::NoPaymentMethod)
    ));
}

#[tokio::test]
async fn draft_items_snapshot_the_cart() {
    let mut cart = Cart::new();
    assert!(cart.add(spotify(), duo_plan(), 2));

    let form = CheckoutForm {
        contact: contact(),
        payment_method: Some(PaymentMethod::InternetBanking),
        proof: Some(PaymentProof {
            url: "/uploads/proof-3.png".to_owned(),
        }),
    };

    let store = MemoryOrderStore::default();
    let service = CheckoutService::new(store.clone());
    service.place_order(&cart, &form, None).await.unwrap();

    let placed = store.placed.lock().unwrap();
    assert_eq!(placed.len(), 1);
    let draft = &placed[0];
    assert_eq!(draft.items.len(), 1);
    assert_eq!(draft.items[0].variant_label.as_deref(), Some("Duo / 3 Months"));
    assert_eq!(draft.items[0].quantity, 2);
    assert_eq!(draft.items[0].unit_price, Money::from_rupees(1299));
    assert_eq!(draft.subtotal, Money::from_rupees(2598));
}
