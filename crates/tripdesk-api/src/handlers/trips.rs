//! Trip CRUD handlers
//!
//! Reads are public; create and update sit behind the auth middleware and
//! additionally take the `AuthUser` extractor, so they cannot run without a
//! verified token even if the route table changes underneath them.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use tripdesk_core::{AppError, Trip};

pub async fn list_trips(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Trip>>, HttpAppError> {
    let trips = state.trips.list().await?;
    Ok(Json(trips))
}

pub async fn find_trip_by_code(
    State(state): State<Arc<AppState>>,
    Path(trip_code): Path<String>,
) -> Result<Json<Trip>, HttpAppError> {
    let trip = state
        .trips
        .find_by_code(&trip_code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip not found: {}", trip_code)))?;
    Ok(Json(trip))
}

pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(trip): Json<Trip>,
) -> Result<(StatusCode, Json<Trip>), HttpAppError> {
    validate_trip(&trip)?;

    tracing::info!(code = %trip.code, user = %claims.sub, "Creating trip");
    let created = state.trips.create(trip).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_trip(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(trip_code): Path<String>,
    Json(trip): Json<Trip>,
) -> Result<Json<Trip>, HttpAppError> {
    validate_trip(&trip)?;

    tracing::info!(code = %trip_code, user = %claims.sub, "Updating trip");
    let updated = state.trips.update(&trip_code, trip).await?;
    Ok(Json(updated))
}

/// Required-field check mirroring the browser form's validators.
fn validate_trip(trip: &Trip) -> Result<(), AppError> {
    let missing = [
        ("code", trip.code.is_empty()),
        ("name", trip.name.is_empty()),
        ("length", trip.length.is_empty()),
        ("resort", trip.resort.is_empty()),
        ("perPerson", trip.per_person.is_empty()),
        ("description", trip.description.is_empty()),
    ]
    .iter()
    .filter(|(_, empty)| *empty)
    .map(|(field, _)| *field)
    .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
