//! Shared test setup: app builder over in-memory storage, token minting,
//! trip fixtures.

pub mod fixtures;

use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use tripdesk_api::auth::jwt::mint_token;
use tripdesk_api::setup::routes::build_router;
use tripdesk_api::state::AppState;
use tripdesk_api::store::InMemoryTripRepository;
use tripdesk_core::config::{StorageBackend, UploadPolicy};
use tripdesk_core::{Config, Trip};
use tripdesk_storage::MemoryStorage;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_BUCKET: &str = "trip-images-test";

pub struct TestApp {
    pub server: TestServer,
    /// Handle onto the same storage the server writes to.
    pub storage: MemoryStorage,
    pub state: Arc<AppState>,
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec![],
        environment: "test".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        storage_backend: StorageBackend::Memory,
        s3_bucket: TEST_BUCKET.to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        s3_put_timeout_secs: 5,
        upload: UploadPolicy::default(),
    }
}

pub fn setup_test_app() -> TestApp {
    let storage = MemoryStorage::new(TEST_BUCKET);
    let trips = Arc::new(InMemoryTripRepository::new());
    let state = Arc::new(AppState::new(
        test_config(),
        Arc::new(storage.clone()),
        trips,
    ));

    let server = TestServer::new(build_router(state.clone())).expect("failed to build test server");

    TestApp {
        server,
        storage,
        state,
    }
}

/// A valid bearer token for the test secret.
pub fn auth_token() -> String {
    mint_token(
        "traveler@example.com",
        "Traveler",
        TEST_JWT_SECRET,
        Duration::hours(1),
    )
    .expect("failed to mint test token")
}

/// A structurally valid but expired token.
pub fn expired_token() -> String {
    mint_token(
        "traveler@example.com",
        "Traveler",
        TEST_JWT_SECRET,
        Duration::seconds(-3600),
    )
    .expect("failed to mint test token")
}

pub fn sample_trip(code: &str) -> Trip {
    Trip {
        code: code.to_string(),
        name: "Gale Reef".to_string(),
        length: "4 nights / 5 days".to_string(),
        start: Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap(),
        resort: "Emerald Bay, Marigot Bay".to_string(),
        per_person: "799.00".to_string(),
        image: String::new(),
        description: "Sailing and snorkeling around Gale Reef.".to_string(),
    }
}
