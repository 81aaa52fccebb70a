//! Shared HTTP client for the Tripdesk API.
//!
//! Provides a minimal client with optional bearer auth, generic JSON
//! helpers, trip CRUD methods, an image uploader with progress reporting
//! (`uploader`), and the two-phase form submit flow (`form`).

pub mod form;
pub mod uploader;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tripdesk_core::Trip;

pub use form::{FileSelection, SubmitFlow, SubmitMode, SubmitState, TripClient, TripForm};
pub use uploader::{UploadClient, Uploader};

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// No auth header; enough for reads and uploads.
    None,
}

/// HTTP client for the Tripdesk API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create client from environment: TRIPDESK_API_URL, TRIPDESK_TOKEN.
    /// The token is optional; without it only public routes work.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("TRIPDESK_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let auth = match std::env::var("TRIPDESK_TOKEN") {
            Ok(token) => Auth::Bearer(token),
            Err(_) => Auth::None,
        };

        Self::new(base_url, auth)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::None => request,
        }
    }

    async fn handle_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }
        response.json().await.context("Failed to parse response")
    }

    /// GET request, deserializing the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.apply_auth(self.client.get(self.build_url(path)));
        let response = request.send().await.context("Failed to send request")?;
        Self::handle_json(response).await
    }

    /// POST request with a JSON body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body));
        let response = request.send().await.context("Failed to send request")?;
        Self::handle_json(response).await
    }

    /// PUT request with a JSON body.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.apply_auth(self.client.put(self.build_url(path)).json(body));
        let response = request.send().await.context("Failed to send request")?;
        Self::handle_json(response).await
    }

    // Domain methods

    pub async fn list_trips(&self) -> Result<Vec<Trip>> {
        self.get("/trips").await
    }

    pub async fn get_trip(&self, code: &str) -> Result<Trip> {
        self.get(&format!("/trips/{}", code)).await
    }

    pub async fn add_trip(&self, trip: &Trip) -> Result<Trip> {
        self.post("/trips", trip).await
    }

    pub async fn update_trip(&self, code: &str, trip: &Trip) -> Result<Trip> {
        self.put(&format!("/trips/{}", code), trip).await
    }

    /// Uploader bound to this client's base URL. Uploads are unauthenticated
    /// on the server, so no token is attached.
    pub fn uploader(&self) -> Uploader {
        Uploader::new(self.client.clone(), self.base_url.clone())
    }
}

#[async_trait]
impl TripClient for ApiClient {
    async fn create_trip(&self, trip: &Trip) -> Result<Trip> {
        self.add_trip(trip).await
    }

    async fn replace_trip(&self, code: &str, trip: &Trip) -> Result<Trip> {
        self.update_trip(code, trip).await
    }
}
