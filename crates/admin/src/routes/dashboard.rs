//! Dashboard summary endpoint.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::db::AdminOrderRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// `GET /api/dashboard`
///
/// Order counts per status plus revenue over completed orders.
pub async fn summary(
    RequireAdminAuth(_): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let repo = AdminOrderRepository::new(state.pool());

    let counts: BTreeMap<String, i64> = repo
        .status_counts()
        .await?
        .into_iter()
        .map(|(status, count)| (status.to_string(), count))
        .collect();
    let revenue = repo.completed_revenue().await?;

    Ok(Json(json!({
        "status_counts": counts,
        "completed_revenue": revenue,
    })))
}
