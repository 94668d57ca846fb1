//! Login and logout.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use kinmel_core::Email;

use crate::db::AdminUserRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{self, AuthError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login`
///
/// An unknown email and a wrong password answer identically so the
/// endpoint cannot be used to probe for staff accounts.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<CurrentAdmin>> {
    let email = Email::parse(&form.email).map_err(|_| AuthError::InvalidCredentials)?;

    let repo = AdminUserRepository::new(state.pool());
    let user = repo
        .get_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    auth::verify_password(&form.password, &user.password_hash)?;

    let current = CurrentAdmin::from(&user);
    set_current_admin(&session, &current).await?;

    tracing::info!(admin = %current.email, "Admin logged in");
    Ok(Json(current))
}

/// `POST /auth/logout`
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_admin(&session).await?;
    Ok(Json(json!({ "ok": true })))
}

/// `GET /auth/me`
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
