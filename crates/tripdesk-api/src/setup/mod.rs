//! Application setup and initialization
//!
//! Initialization logic lives here rather than in main.rs so integration
//! tests can build the exact production router against test doubles.

pub mod routes;
pub mod server;

use crate::state::AppState;
use crate::store::InMemoryTripRepository;
use anyhow::{Context, Result};
use std::sync::Arc;
use tripdesk_core::Config;
use tripdesk_storage::create_storage;

/// Initialize the application: storage backend, trip repository, routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize object storage")?;

    let trips = Arc::new(InMemoryTripRepository::new());

    let state = Arc::new(AppState::new(config, storage, trips));
    let router = routes::build_router(state.clone());

    Ok((state, router))
}
