//! Checkout wizard route handlers.
//!
//! Three steps: contact information, payment method, then proof upload and
//! submission. The wizard state lives in the session next to the cart and
//! every forward move goes through the gates in `kinmel_core::checkout`;
//! hand-editing a URL cannot skip a step.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use kinmel_core::{
    Cart, CheckoutForm, CheckoutStep, ContactInfo, Order, OrderItem, OrderNumber, PaymentMethod,
};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session_keys;
use crate::services::{CheckoutService, PlaceOrderError};
use crate::state::AppState;

/// The wizard state as stored in the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutState {
    pub step: CheckoutStep,
    pub form: CheckoutForm,
    pub note: Option<String>,
}

async fn load_state(session: &Session) -> Result<CheckoutState> {
    Ok(session
        .get::<CheckoutState>(session_keys::CHECKOUT)
        .await?
        .unwrap_or_default())
}

async fn save_state(session: &Session, state: &CheckoutState) -> Result<()> {
    session.insert(session_keys::CHECKOUT, state).await?;
    Ok(())
}

// =============================================================================
// Forms
// =============================================================================

/// Step 1 form data.
#[derive(Debug, Deserialize)]
pub struct InformationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub note: Option<String>,
}

/// Step 2 form data.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Templates
// =============================================================================

/// Step 1: contact information.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/information.html")]
pub struct InformationTemplate {
    pub cart: Cart,
    pub checkout: CheckoutState,
    pub error: Option<String>,
}

/// Step 2: payment method selection.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/payment.html")]
pub struct PaymentTemplate {
    pub cart: Cart,
    pub checkout: CheckoutState,
    pub methods: [PaymentMethod; 4],
    pub error: Option<String>,
}

impl PaymentTemplate {
    /// Whether this method is the one currently chosen; used to keep the
    /// radio selection across back navigation.
    fn is_selected(&self, method: &PaymentMethod) -> bool {
        self.checkout.form.payment_method == Some(*method)
    }
}

/// Step 3: review, proof upload and submission.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirm.html")]
pub struct ConfirmTemplate {
    pub cart: Cart,
    pub checkout: CheckoutState,
    pub error: Option<String>,
}

/// Confirmation page after placement.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the current wizard step. An empty cart redirects back to it.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let cart = super::cart::session_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let checkout = load_state(&session).await?;
    Ok(render_step(cart, checkout, None))
}

fn render_step(cart: Cart, checkout: CheckoutState, error: Option<String>) -> Response {
    match checkout.step {
        CheckoutStep::Information => InformationTemplate {
            cart,
            checkout,
            error,
        }
        .into_response(),
        CheckoutStep::Payment => PaymentTemplate {
            cart,
            checkout,
            methods: PaymentMethod::ALL,
            error,
        }
        .into_response(),
        CheckoutStep::Confirm => ConfirmTemplate {
            cart,
            checkout,
            error,
        }
        .into_response(),
        // A placed wizard should have been cleared; start over.
        CheckoutStep::Placed => Redirect::to("/cart").into_response(),
    }
}

/// Submit step 1. Values are kept even when validation fails.
#[instrument(skip(session))]
pub async fn submit_information(
    session: Session,
    Form(form): Form<InformationForm>,
) -> Result<Response> {
    let cart = super::cart::session_cart(&session).await?;
    let mut checkout = load_state(&session).await?;

    checkout.form.contact = ContactInfo {
        name: form.name,
        email: form.email,
        phone: form.phone,
    };
    checkout.note = form.note.filter(|note| !note.trim().is_empty());

    match checkout.form.advance(CheckoutStep::Information) {
        Ok(next) => {
            checkout.step = next;
            save_state(&session, &checkout).await?;
            Ok(Redirect::to("/checkout").into_response())
        }
        Err(err) => {
            save_state(&session, &checkout).await?;
            Ok(render_step(cart, checkout, Some(err.to_string())))
        }
    }
}

/// Submit step 2.
#[instrument(skip(session))]
pub async fn submit_payment(session: Session, Form(form): Form<PaymentForm>) -> Result<Response> {
    let cart = super::cart::session_cart(&session).await?;
    let mut checkout = load_state(&session).await?;

    checkout.form.payment_method = Some(form.payment_method);

    match checkout.form.advance(CheckoutStep::Payment) {
        Ok(next) => {
            checkout.step = next;
            save_state(&session, &checkout).await?;
            Ok(Redirect::to("/checkout").into_response())
        }
        Err(err) => {
            save_state(&session, &checkout).await?;
            Ok(render_step(cart, checkout, Some(err.to_string())))
        }
    }
}

/// Upload the payment screenshot (multipart). The file goes through the
/// image upload policy before it is stored.
#[instrument(skip(state, session, multipart))]
pub async fn upload_proof(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut checkout = load_state(&session).await?;

    let mut screenshot: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("screenshot") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(ToOwned::to_owned)
            .ok_or_else(|| AppError::BadRequest("missing content type".to_owned()))?;
        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?;
        screenshot = Some((content_type, data));
    }

    let (content_type, data) =
        screenshot.ok_or_else(|| AppError::BadRequest("no screenshot attached".to_owned()))?;

    crate::services::checkout::attach_proof(state.proofs(), &mut checkout.form, &content_type, &data)
        .await
        .map_err(|err| match err {
            crate::services::proofs::ProofStoreError::Rejected(e) => AppError::Upload(e),
            crate::services::proofs::ProofStoreError::Io(e) => AppError::Internal(e.to_string()),
        })?;
    save_state(&session, &checkout).await?;

    Ok(Redirect::to("/checkout").into_response())
}

/// Submit step 3: place the order. On success the cart and the wizard
/// state are cleared; on failure both survive so the shopper can retry.
#[instrument(skip(state, session))]
pub async fn place(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = super::cart::session_cart(&session).await?;
    let checkout = load_state(&session).await?;

    let orders = OrderRepository::new(state.pool());
    let service = CheckoutService::new(orders);

    match service
        .place_order(&cart, &checkout.form, checkout.note.clone())
        .await
    {
        Ok(order) => {
            session.remove::<Cart>(session_keys::CART).await?;
            session
                .remove::<CheckoutState>(session_keys::CHECKOUT)
                .await?;
            Ok(Redirect::to(&format!("/orders/{}", order.order_number)).into_response())
        }
        Err(PlaceOrderError::EmptyCart) => Ok(Redirect::to("/cart").into_response()),
        Err(PlaceOrderError::Step(err)) => Ok(render_step(cart, checkout, Some(err.to_string()))),
        Err(PlaceOrderError::Repository(err)) => Err(AppError::Database(err)),
    }
}

/// Step back without losing entered values.
#[instrument(skip(session))]
pub async fn back(session: Session) -> Result<Redirect> {
    let mut checkout = load_state(&session).await?;
    checkout.step = checkout.step.back();
    save_state(&session, &checkout).await?;
    Ok(Redirect::to("/checkout"))
}

/// Order confirmation page, looked up by public order number.
#[instrument(skip(state))]
pub async fn confirmation(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<ConfirmationTemplate> {
    let number = OrderNumber::from_raw(number);
    let orders = OrderRepository::new(state.pool());
    let (order, items) = orders
        .get_by_number(&number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {number}")))?;

    Ok(ConfirmationTemplate { order, items })
}
