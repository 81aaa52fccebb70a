//! Configuration module
//!
//! Configuration is read from the environment once at process start,
//! validated, and never mutated afterwards. Every in-flight request sees the
//! same policy (JWT secret, bucket identity, upload limits) through a shared
//! reference.

use std::env;

use anyhow::{bail, Context};

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_S3_PUT_TIMEOUT_SECS: u64 = 30;

/// Upload size ceiling: 5 MiB, matching the public error message
/// "File size exceeds limit of 5MB".
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for trip-cover uploads. Exact match, no wildcards.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    /// In-process storage, used by tests and local development.
    Memory,
}

impl StorageBackend {
    fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown storage backend: {}", other),
        }
    }
}

/// Validation policy for incoming uploads.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed_content_types: ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Shared secret for HS256 bearer-token verification.
    pub jwt_secret: String,
    pub storage_backend: StorageBackend,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (MinIO etc.).
    pub s3_endpoint: Option<String>,
    /// Ceiling on a single object-store put; expiry surfaces as a storage error.
    pub s3_put_timeout_secs: u64,
    pub upload: UploadPolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port = match env::var("PORT") {
            Ok(v) => v.parse::<u16>().context("PORT must be a port number")?,
            Err(_) => DEFAULT_SERVER_PORT,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(v) => StorageBackend::parse(&v)?,
            Err(_) => StorageBackend::S3,
        };

        let s3_bucket = env::var("S3_BUCKET_NAME").unwrap_or_default();
        let s3_region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let s3_endpoint = env::var("S3_ENDPOINT").ok();
        let s3_put_timeout_secs = env::var("S3_PUT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_S3_PUT_TIMEOUT_SECS);

        let config = Config {
            server_port,
            cors_origins,
            environment,
            jwt_secret,
            storage_backend,
            s3_bucket,
            s3_region,
            s3_endpoint,
            s3_put_timeout_secs,
            upload: UploadPolicy::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on misconfiguration before anything binds or connects.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.len() < 16 {
            bail!("JWT_SECRET must be at least 16 characters");
        }
        if self.storage_backend == StorageBackend::S3 && self.s3_bucket.is_empty() {
            bail!("S3_BUCKET_NAME must be set when STORAGE_BACKEND=s3");
        }
        if self.upload.max_bytes == 0 {
            bail!("Upload size limit must be non-zero");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
