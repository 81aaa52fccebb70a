//! Storage abstraction trait
//!
//! This module defines the `ObjectStorage` trait that all storage backends
//! must implement. The write contract is all-or-nothing: a put either stores
//! the whole object durably or fails without leaving a partial object.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Upload timed out after {0} seconds")]
    Timeout(u64),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object storage abstraction
///
/// Keys are generated by [`crate::keys::object_key`] and are never reused or
/// mutated after creation. The URL returned by `put` is derived from the
/// bucket identity plus the key and stays valid for the life of the object.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store a payload under `key` and return the public URL.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String>;

    /// Fetch an object by key. Used by tests and tooling, not the upload path.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public URL for a key, without a round trip.
    fn url_for(&self, key: &str) -> String;
}
