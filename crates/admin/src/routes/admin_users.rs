//! Staff account management, super admin only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use kinmel_core::{AdminUserId, Email};

use crate::db::AdminUserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireSuperAdmin;
use crate::models::{AdminRole, CurrentAdmin};
use crate::services::auth;
use crate::state::AppState;

/// `GET /api/staff`
pub async fn list(
    RequireSuperAdmin(_): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<CurrentAdmin>>> {
    let users = AdminUserRepository::new(state.pool()).list_all().await?;
    Ok(Json(users.iter().map(CurrentAdmin::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateStaffForm {
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    pub password: String,
}

const MIN_PASSWORD_LENGTH: usize = 12;

/// `POST /api/staff`
pub async fn create(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(form): Json<CreateStaffForm>,
) -> Result<(StatusCode, Json<CurrentAdmin>)> {
    let email = Email::parse(&form.email)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let password_hash = auth::hash_password(&form.password)?;
    let user = AdminUserRepository::new(state.pool())
        .create(&email, &form.name, form.role, &password_hash)
        .await?;

    tracing::info!(staff = %user.email, by = %admin.email, "Staff account created");
    Ok((StatusCode::CREATED, Json(CurrentAdmin::from(&user))))
}

/// `DELETE /api/staff/{id}`
pub async fn remove(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let id = AdminUserId::new(id);
    if id == admin.id {
        return Err(AppError::BadRequest(
            "cannot delete your own account".to_owned(),
        ));
    }

    AdminUserRepository::new(state.pool()).delete(id).await?;
    tracing::info!(staff_id = id.as_i32(), by = %admin.email, "Staff account deleted");
    Ok(Json(json!({ "ok": true })))
}
