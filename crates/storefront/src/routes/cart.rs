//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; handlers load it, mutate it
//! through `kinmel_core::Cart` and write it back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use kinmel_core::{Cart, DenominationChoice, PlanChoice, Variant};
use kinmel_core::{DenominationId, DurationId, ProductId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, or an empty one.
pub async fn session_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data. A duration selects a subscription plan; a
/// denomination selects a gift card amount; neither means the base product.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub duration_id: Option<DurationId>,
    pub denomination_id: Option<DenominationId>,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: Uuid,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: Uuid,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: Cart,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: Cart,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = session_cart(&session).await?;
    Ok(CartShowTemplate { cart })
}

/// Add an item to the cart (HTMX).
///
/// Looks the product up fresh so the stored snapshot carries current
/// prices, then merges into an existing line when product and variant
/// match. Returns the count badge with a `cart-updated` trigger.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let catalog = CatalogRepository::new(state.pool());
    let product = catalog
        .product_by_id(form.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let plan = form.duration_id.and_then(|id| {
        product
            .find_duration(id)
            .map(|(plan, duration)| PlanChoice {
                plan_name: plan.name.clone(),
                duration_label: duration.label.clone(),
                price: duration.price,
            })
    });
    let denomination = form.denomination_id.and_then(|id| {
        product.find_denomination(id).map(|denom| DenominationChoice {
            label: denom.label.clone(),
            amount: denom.amount,
        })
    });
    let variant = Variant::from_parts(plan, denomination);

    let mut cart = session_cart(&session).await?;
    if !cart.add(product.snapshot(), variant, form.quantity.unwrap_or(1)) {
        return Err(AppError::BadRequest("item cannot be added".to_owned()));
    }
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Update a line's quantity (HTMX). Quantity zero removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<CartItemsTemplate> {
    let mut cart = session_cart(&session).await?;
    cart.update_quantity(form.line_id, form.quantity);
    save_cart(&session, &cart).await?;
    Ok(CartItemsTemplate { cart })
}

/// Remove a line (HTMX).
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<CartItemsTemplate> {
    let mut cart = session_cart(&session).await?;
    cart.remove(form.line_id);
    save_cart(&session, &cart).await?;
    Ok(CartItemsTemplate { cart })
}

/// Cart count badge (HTMX fragment).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = session_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}
