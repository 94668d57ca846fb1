//! Order workflow endpoints.
//!
//! Orders arrive from the storefront in `pending`; staff verify the
//! payment screenshot, move the order to `processing`, and fulfil it by
//! delivering credentials, which completes it. Illegal transitions come
//! back as 409 from the repository.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use kinmel_core::{OrderId, OrderStatus};

use crate::db::AdminOrderRepository;
use crate::db::orders::OrderFilter;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::CredentialEntry;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

/// `GET /api/orders`
pub async fn list(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>> {
    let filter = OrderFilter {
        status: query.status,
        search: query.search,
        page: query.page,
        per_page: query.per_page,
    };
    let page = AdminOrderRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(json!({
        "orders": page.orders,
        "total": page.total,
    })))
}

/// `GET /api/orders/{id}`
pub async fn fetch(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let (order, items) = AdminOrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?;
    Ok(Json(json!({ "order": order, "items": items })))
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
}

/// `POST /api/orders/{id}/status`
///
/// Moves the order along the workflow. The repository checks the
/// transition under a row lock; a forbidden move is a 409.
pub async fn update_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Value>> {
    let order = AdminOrderRepository::new(state.pool())
        .update_status(OrderId::new(id), form.status)
        .await?;
    tracing::info!(
        order_number = %order.order_number,
        status = %order.status,
        admin = %admin.email,
        "Order status updated"
    );
    Ok(Json(json!({ "order": order })))
}

#[derive(Debug, Deserialize)]
pub struct DeliverForm {
    pub credentials: Vec<CredentialEntry>,
    pub notes: Option<String>,
}

/// `POST /api/orders/{id}/deliver`
///
/// Sends the pasted credentials to the delivery endpoint, then marks
/// the order completed. The order stays in its current status if
/// delivery fails, so staff can retry.
pub async fn deliver(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<DeliverForm>,
) -> Result<Json<Value>> {
    if form.credentials.is_empty() {
        return Err(AppError::BadRequest(
            "at least one credential is required".to_owned(),
        ));
    }

    let repo = AdminOrderRepository::new(state.pool());
    let (order, items) = repo.get(OrderId::new(id)).await?;

    if !order.status.can_transition_to(OrderStatus::Completed) {
        return Err(AppError::Conflict(format!(
            "cannot deliver an order in status {}",
            order.status
        )));
    }

    state
        .delivery()
        .deliver(&order, &items, &form.credentials, form.notes.as_deref())
        .await?;

    let order = repo.update_status(order.id, OrderStatus::Completed).await?;
    tracing::info!(
        order_number = %order.order_number,
        admin = %admin.email,
        "Order fulfilled"
    );
    Ok(Json(json!({ "order": order })))
}
