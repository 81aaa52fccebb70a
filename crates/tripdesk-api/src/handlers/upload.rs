//! Image upload handler
//!
//! Orchestrates the upload pipeline: extract the multipart payload, validate
//! it against the upload policy, then write it to object storage under a
//! fresh key. Validation fully passes before the storage call is attempted;
//! a validation failure never leaves a partial object behind.
//!
//! This endpoint is deliberately outside the auth gate: anonymous upload is
//! the observed behavior of the system being replaced, and changing it is a
//! product decision, not a porting one.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::error::HttpAppError;
use crate::state::AppState;
use tripdesk_core::validation::{validate_content_type, validate_file_size};
use tripdesk_core::{AppError, UploadedImage};
use tripdesk_storage::keys::object_key;

/// Multipart field name the browser form uses.
const UPLOAD_FIELD: &str = "image";

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadedImage>, HttpAppError> {
    let (data, filename, content_type) = extract_image_field(multipart).await?;

    validate_content_type(&content_type, &state.config.upload)?;
    validate_file_size(data.len(), &state.config.upload)?;

    let key = object_key(&filename);
    tracing::info!(
        key = %key,
        original_filename = %filename,
        content_type = %content_type,
        size_bytes = data.len(),
        "Processing upload"
    );

    let image_url = state.storage.put(&key, data, &content_type).await?;

    Ok(Json(UploadedImage { image_url }))
}

/// Extract payload bytes, filename, and declared content type from the
/// `image` field. The payload is fully buffered here; the transport body
/// limit bounds how much can arrive, and the policy check decides acceptance.
async fn extract_image_field(
    mut multipart: Multipart,
) -> Result<(Bytes, String, String), HttpAppError> {
    let mut payload: Option<(Bytes, String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        payload = Some((data, filename, content_type));
    }

    payload.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()).into())
}
