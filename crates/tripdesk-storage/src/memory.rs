//! In-memory storage backend
//!
//! Used by tests and local development. Objects live in a map behind an
//! RwLock; URLs follow the same `https://{bucket}.s3.amazonaws.com/{key}`
//! shape as the S3 backend so client-visible behavior matches production.

use crate::traits::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MemoryStorage {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
    /// When set, every put fails. Lets tests simulate a storage outage.
    fail_puts: Arc<std::sync::atomic::AtomicBool>,
}

impl MemoryStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        MemoryStorage {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            fail_puts: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    /// Toggle simulated outage for subsequent puts.
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> StorageResult<String> {
        if self.fail_puts.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "simulated storage outage".to_string(),
            ));
        }
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let size = data.len();
        self.objects.write().await.insert(key.to_string(), data);
        tracing::debug!(bucket = %self.bucket, key = %key, size_bytes = size, "Stored object in memory");
        Ok(self.url_for(key))
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    fn url_for(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::object_key;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let storage = MemoryStorage::new("trip-images");
        let key = object_key("photo.png");
        let url = storage
            .put(&key, Bytes::from_static(b"png-bytes"), "image/png")
            .await
            .unwrap();

        assert_eq!(url, format!("https://trip-images.s3.amazonaws.com/{}", key));
        assert!(storage.exists(&key).await.unwrap());
        assert_eq!(storage.get(&key).await.unwrap(), Bytes::from_static(b"png-bytes"));
    }

    #[tokio::test]
    async fn same_payload_twice_yields_two_objects() {
        let storage = MemoryStorage::new("trip-images");
        let data = Bytes::from_static(b"identical");

        let url_a = storage
            .put(&object_key("photo.png"), data.clone(), "image/png")
            .await
            .unwrap();
        let url_b = storage
            .put(&object_key("photo.png"), data, "image/png")
            .await
            .unwrap();

        assert_ne!(url_a, url_b);
        assert_eq!(storage.object_count().await, 2);
    }

    #[tokio::test]
    async fn simulated_outage_fails_put_without_partial_state() {
        let storage = MemoryStorage::new("trip-images");
        storage.set_fail_puts(true);
        let key = object_key("photo.png");

        let err = storage
            .put(&key, Bytes::from_static(b"data"), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
        assert!(!storage.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let storage = MemoryStorage::new("trip-images");
        let err = storage
            .put("../escape", Bytes::from_static(b"x"), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
