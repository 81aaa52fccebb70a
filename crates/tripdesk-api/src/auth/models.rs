use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use tripdesk_core::Claims;

/// Verified claims attached to the request by the auth middleware.
///
/// Proves only that a valid token was presented; there is no role or
/// ownership check in this system.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

// Extracted from request extensions rather than via Extension so handlers
// that also take Multipart keep working.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing authentication context")),
            )
        })
    }
}
