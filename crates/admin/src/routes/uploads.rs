//! Image upload endpoint for catalog and content editors.

use axum::{Json, extract::Multipart, extract::State};
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::UploadStoreError;
use crate::state::AppState;

/// `POST /api/uploads`
///
/// Accepts a multipart form with a single `file` field and responds with
/// the public URL of the stored image.
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("missing content type".to_owned()))?
            .to_owned();
        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?;

        let url = state
            .uploads()
            .store(&content_type, &data)
            .await
            .map_err(|err| match err {
                UploadStoreError::Rejected(rejected) => AppError::Upload(rejected),
                UploadStoreError::Io(io) => AppError::Internal(io.to_string()),
            })?;

        tracing::info!(url, admin = %admin.email, "Image uploaded");
        return Ok(Json(json!({ "url": url })));
    }

    Err(AppError::BadRequest("missing file field".to_owned()))
}
