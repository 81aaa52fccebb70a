use crate::{MemoryStorage, ObjectStorage, S3Storage, StorageError, StorageResult};
use std::sync::Arc;
use std::time::Duration;
use tripdesk_core::config::StorageBackend;
use tripdesk_core::Config;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStorage>> {
    match config.storage_backend {
        StorageBackend::S3 => {
            if config.s3_bucket.is_empty() {
                return Err(StorageError::ConfigError(
                    "S3_BUCKET_NAME not configured".to_string(),
                ));
            }

            let storage = S3Storage::new(
                config.s3_bucket.clone(),
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
                Duration::from_secs(config.s3_put_timeout_secs),
            )
            .await?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            let bucket = if config.s3_bucket.is_empty() {
                "tripdesk-dev".to_string()
            } else {
                config.s3_bucket.clone()
            };
            Ok(Arc::new(MemoryStorage::new(bucket)))
        }
    }
}
