//! Upload payload validation
//!
//! Pure checks that run before any storage write. Order in the handler is
//! presence, then content type, then size; nothing here touches I/O.

use crate::config::UploadPolicy;
use crate::error::AppError;

/// Normalize a MIME type by stripping parameters
/// (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate the declared content type against the exact-match allowlist.
pub fn validate_content_type(content_type: &str, policy: &UploadPolicy) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !policy
        .allowed_content_types
        .iter()
        .any(|ct| normalized == ct.to_lowercase())
    {
        return Err(AppError::InvalidInput(
            "Invalid file type. Only images are allowed.".to_string(),
        ));
    }
    Ok(())
}

/// Validate the payload size. The comparison is strictly greater-than: a
/// payload of exactly `max_bytes` is accepted.
pub fn validate_file_size(file_size: usize, policy: &UploadPolicy) -> Result<(), AppError> {
    if file_size > policy.max_bytes {
        return Err(AppError::PayloadTooLarge(
            "File size exceeds limit of 5MB".to_string(),
        ));
    }
    Ok(())
}
