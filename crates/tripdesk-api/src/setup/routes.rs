//! Route configuration and setup
//!
//! Route table:
//!
//! | route | auth |
//! | --- | --- |
//! | `GET /health` | public |
//! | `GET /trips` | public |
//! | `GET /trips/{tripCode}` | public |
//! | `POST /upload` | public (observed asymmetry, kept as-is) |
//! | `POST /trips` | bearer token |
//! | `PUT /trips/{tripCode}` | bearer token |

use crate::auth::{require_auth, AuthConfig};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Transport-level body ceiling. Well above the 5 MiB policy limit so an
/// oversized payload reaches the validator and gets the documented 413 body
/// instead of a bare connection-level rejection.
const MAX_REQUEST_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let auth_config = Arc::new(AuthConfig {
        jwt_secret: state.config.jwt_secret.clone(),
    });

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/trips", get(handlers::trips::list_trips))
        .route("/trips/{trip_code}", get(handlers::trips::find_trip_by_code))
        .route("/upload", post(handlers::upload::upload_image));

    // Protected routes (require a verified bearer token)
    let protected_routes = Router::new()
        .route("/trips", post(handlers::trips::create_trip))
        .route("/trips/{trip_code}", put(handlers::trips::update_trip))
        .layer(axum::middleware::from_fn_with_state(
            auth_config,
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(setup_cors(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn setup_cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
