//! Trip repository
//!
//! Trip persistence is an external collaborator for this service; the trait
//! is the seam where a database-backed implementation would plug in. The
//! in-memory implementation backs tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tripdesk_core::{AppError, Trip};

#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Trip>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Trip>, AppError>;
    /// Insert a new trip; fails with `Conflict` if the code is taken.
    async fn create(&self, trip: Trip) -> Result<Trip, AppError>;
    /// Replace the trip stored under `code`; fails with `NotFound` if absent.
    async fn update(&self, code: &str, trip: Trip) -> Result<Trip, AppError>;
}

#[derive(Default)]
pub struct InMemoryTripRepository {
    trips: RwLock<HashMap<String, Trip>>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn list(&self) -> Result<Vec<Trip>, AppError> {
        let mut trips: Vec<Trip> = self.trips.read().await.values().cloned().collect();
        trips.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(trips)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Trip>, AppError> {
        Ok(self.trips.read().await.get(code).cloned())
    }

    async fn create(&self, trip: Trip) -> Result<Trip, AppError> {
        let mut trips = self.trips.write().await;
        if trips.contains_key(&trip.code) {
            return Err(AppError::Conflict(format!(
                "Trip with code {} already exists",
                trip.code
            )));
        }
        trips.insert(trip.code.clone(), trip.clone());
        Ok(trip)
    }

    async fn update(&self, code: &str, trip: Trip) -> Result<Trip, AppError> {
        let mut trips = self.trips.write().await;
        if trips.remove(code).is_none() {
            return Err(AppError::NotFound(format!("Trip not found: {}", code)));
        }
        // The record may carry a changed code; it is re-keyed under the new one.
        trips.insert(trip.code.clone(), trip.clone());
        Ok(trip)
    }
}
