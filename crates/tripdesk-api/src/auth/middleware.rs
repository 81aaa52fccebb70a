//! Request gate: bearer-token verification middleware
//!
//! Wraps the trip-mutation routes. Verification runs to completion before
//! the wrapped handler can observe the request: every failure path returns
//! 401 immediately, and `next.run` is reached on exactly one branch. (An
//! earlier incarnation of this gate could fall through to the handler after
//! a failed verification; the single-branch structure here is deliberate.)

use crate::auth::jwt::verify_token;
use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tripdesk_core::AppError;

/// Read-only verification state, built once at startup.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

pub async fn require_auth(
    State(auth): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_bearer_token(&request) {
        Ok(token) => token,
        Err(err) => return HttpAppError(err).into_response(),
    };

    match verify_token(token, &auth.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser(claims));
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(error = %err, "Bearer token rejected");
            HttpAppError(err).into_response()
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// A header with fewer than two whitespace-separated segments, a non-Bearer
/// scheme, or an empty token is malformed and rejected outright.
fn extract_bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    let mut segments = header.split_whitespace();
    let scheme = segments
        .next()
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;
    let token = segments
        .next()
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AppError::Unauthorized(
            "Authorization scheme must be Bearer".to_string(),
        ));
    }

    Ok(token)
}
