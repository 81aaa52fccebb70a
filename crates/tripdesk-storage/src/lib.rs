//! Tripdesk Storage Library
//!
//! Object-storage abstraction for trip-cover images. The S3 backend writes
//! each upload as a single atomic put under a fresh collision-resistant key
//! (`{uuid}-{filename}`) and derives the public URL deterministically from
//! the bucket identity, so the URL is reconstructible without a round trip.
//!
//! The in-memory backend exists for tests and local development; it keeps
//! the same key/URL contract.

pub mod factory;
pub mod keys;
pub mod memory;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::object_key;
pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
