//! Checkout orchestration: validates the wizard state and turns the cart
//! into a placed order.
//!
//! The service is generic over its stores so the placement flow can be
//! exercised without a database.

use kinmel_core::{Cart, CheckoutForm, Order, OrderDraft, OrderNumber, PaymentProof, StepError};

use crate::db::RepositoryError;
use crate::services::proofs::{FsProofStore, ProofStoreError};

/// Persistence boundary for order placement.
pub trait OrderStore {
    /// Reserve the next public order number.
    fn next_order_number(
        &self,
    ) -> impl Future<Output = Result<OrderNumber, RepositoryError>> + Send;

    /// Insert the order and its items atomically.
    fn create_with_items(
        &self,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<Order, RepositoryError>> + Send;
}

/// Storage boundary for payment proof screenshots.
pub trait ProofStore {
    /// Validate and persist a screenshot, returning its public URL.
    fn store(
        &self,
        content_type: &str,
        data: &[u8],
    ) -> impl Future<Output = Result<String, ProofStoreError>> + Send;
}

impl OrderStore for crate::db::OrderRepository<'_> {
    async fn next_order_number(&self) -> Result<OrderNumber, RepositoryError> {
        Self::next_order_number(self).await
    }

    async fn create_with_items(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        Self::create_with_items(self, draft).await
    }
}

impl ProofStore for FsProofStore {
    async fn store(&self, content_type: &str, data: &[u8]) -> Result<String, ProofStoreError> {
        Self::store(self, content_type, data).await
    }
}

/// Validate and persist a screenshot, then attach it to the wizard form.
///
/// # Errors
///
/// Returns the store's error untouched; the form is only modified on
/// success.
pub async fn attach_proof<P: ProofStore>(
    proofs: &P,
    form: &mut CheckoutForm,
    content_type: &str,
    data: &[u8],
) -> Result<(), ProofStoreError> {
    let url = proofs.store(content_type, data).await?;
    form.proof = Some(PaymentProof { url });
    Ok(())
}

/// Error placing an order.
#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,
    /// The wizard state does not allow placement yet.
    #[error(transparent)]
    Step(#[from] StepError),
    /// The database rejected the order. The caller keeps the cart so the
    /// shopper can retry.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Drives the final step of the checkout wizard.
pub struct CheckoutService<S> {
    orders: S,
}

impl<S: OrderStore> CheckoutService<S> {
    pub const fn new(orders: S) -> Self {
        Self { orders }
    }

    /// Place an order from a completed wizard.
    ///
    /// The form must be able to advance from `Confirm` to `Placed`; the
    /// cart must be non-empty. On success the caller clears the cart and
    /// the wizard state.
    ///
    /// # Errors
    ///
    /// Returns `PlaceOrderError` if validation fails or the insert is
    /// rejected. The cart is untouched on failure.
    pub async fn place_order(
        &self,
        cart: &Cart,
        form: &CheckoutForm,
        note: Option<String>,
    ) -> Result<Order, PlaceOrderError> {
        if cart.is_empty() {
            return Err(PlaceOrderError::EmptyCart);
        }
        if !form.information_valid() {
            return Err(StepError::IncompleteContact.into());
        }
        let payment_method = form.payment_method.ok_or(StepError::NoPaymentMethod)?;
        let proof_url = form
            .proof
            .as_ref()
            .map(|proof| proof.url.clone())
            .ok_or(StepError::NoPaymentProof)?;

        let order_number = self.orders.next_order_number().await?;
        let draft = OrderDraft::from_cart(
            cart,
            order_number,
            form.contact.clone(),
            note,
            payment_method,
            Some(proof_url),
        );

        let order = self.orders.create_with_items(&draft).await?;
        tracing::info!(
            order_number = %order.order_number,
            total = %order.total,
            "Order placed"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use kinmel_core::{
        ContactInfo, Money, OrderId, OrderStatus, PaymentMethod, PaymentProof, ProductId,
        ProductKind, ProductSnapshot, Variant,
    };

    use super::*;

    fn snapshot(name: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(1),
            name: name.to_owned(),
            slug: name.to_lowercase().replace(' ', "-"),
            image_url: None,
            base_price: Money::from_rupees(price),
            original_price: None,
            kind: ProductKind::Simple,
            category_id: None,
            category_name: None,
        }
    }

    fn completed_form() -> CheckoutForm {
        CheckoutForm {
            contact: ContactInfo {
                name: "Sita Sharma".to_owned(),
                email: "sita@example.com".to_owned(),
                phone: "9841000000".to_owned(),
            },
            payment_method: Some(PaymentMethod::Esewa),
            proof: Some(PaymentProof {
                url: "/uploads/proof-abc.png".to_owned(),
            }),
        }
    }

    /// In-memory order store. `fail_items` makes the insert fail the way a
    /// mid-transaction error would, with nothing persisted.
    struct FakeOrderStore {
        seq: Mutex<i64>,
        placed: Mutex<Vec<OrderDraft>>,
        fail_items: bool,
    }

    impl FakeOrderStore {
        fn new() -> Self {
            Self {
                seq: Mutex::new(0),
                placed: Mutex::new(Vec::new()),
                fail_items: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_items: true,
                ..Self::new()
            }
        }
    }

    impl OrderStore for FakeOrderStore {
        async fn next_order_number(&self) -> Result<OrderNumber, RepositoryError> {
            let mut seq = self.seq.lock().unwrap();
            *seq += 1;
            Ok(OrderNumber::from_sequence(*seq))
        }

        async fn create_with_items(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
            if self.fail_items {
                return Err(RepositoryError::DataCorruption(
                    "item insert failed".to_owned(),
                ));
            }
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

    #[tokio::test]
    async fn test_happy_path_places_pending_order() {
        let mut cart = Cart::new();
        assert!(cart.add(snapshot("Netflix Gift Card", 499), Variant::Simple, 2));

        let service = CheckoutService::new(FakeOrderStore::new());
        let order = service
            .place_order(&cart, &completed_form(), None)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_number.to_string(), "KM-000001");
        assert_eq!(order.total, Money::from_rupees(998));
        assert_eq!(order.subtotal, order.total);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let service = CheckoutService::new(FakeOrderStore::new());
        let err = service
            .place_order(&Cart::new(), &completed_form(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaceOrderError::EmptyCart));
    }

    #[tokio::test]
    async fn test_missing_proof_rejected() {
        let mut cart = Cart::new();
        assert!(cart.add(snapshot("Spotify", 899), Variant::Simple, 1));

        let mut form = completed_form();
        form.proof = None;

        let service = CheckoutService::new(FakeOrderStore::new());
        let err = service.place_order(&cart, &form, None).await.unwrap_err();
        assert!(matches!(
            err,
            PlaceOrderError::Step(StepError::NoPaymentProof)
        ));
    }

    /// In-memory proof store; records what was stored without touching disk.
    struct FakeProofStore {
        stored: Mutex<Vec<String>>,
        reject: bool,
    }

    impl FakeProofStore {
        fn new() -> Self {
            Self {
                stored: Mutex::new(Vec::new()),
                reject: false,
            }
        }
    }

    impl ProofStore for FakeProofStore {
        async fn store(&self, content_type: &str, _data: &[u8]) -> Result<String, ProofStoreError> {
            if self.reject {
                return Err(ProofStoreError::Rejected(
                    kinmel_core::UploadError::UnsupportedType(content_type.to_owned()),
                ));
            }
            let url = format!("/uploads/proof-{content_type}.png");
            self.stored.lock().unwrap().push(url.clone());
            Ok(url)
        }
    }

    #[tokio::test]
    async fn test_attach_proof_stores_and_fills_form() {
        let proofs = FakeProofStore::new();
        let mut form = completed_form();
        form.proof = None;

        attach_proof(&proofs, &mut form, "image/png", b"fake-bytes")
            .await
            .unwrap();

        let stored = proofs.stored.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(form.proof.as_ref().map(|p| p.url.as_str()), stored.first().map(String::as_str));
    }

    #[tokio::test]
    async fn test_attach_proof_rejection_leaves_form_untouched() {
        let proofs = FakeProofStore {
            reject: true,
            ..FakeProofStore::new()
        };
        let mut form = completed_form();
        form.proof = None;

        let err = attach_proof(&proofs, &mut form, "application/pdf", b"%PDF")
            .await
            .unwrap_err();

        assert!(matches!(err, ProofStoreError::Rejected(_)));
        assert!(form.proof.is_none());
    }

    #[tokio::test]
    async fn test_failed_insert_surfaces_error_and_keeps_cart() {
        let mut cart = Cart::new();
        assert!(cart.add(snapshot("PUBG UC", 1500), Variant::Simple, 1));

        let service = CheckoutService::new(FakeOrderStore::failing());
        let err = service
            .place_order(&cart, &completed_form(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, PlaceOrderError::Repository(_)));
        // Placement does not consume the cart; the handler only clears it
        // after success.
        assert_eq!(cart.item_count(), 1);
    }
}
