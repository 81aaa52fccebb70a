//! Tripdesk Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! upload validation shared across the Tripdesk components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, StorageBackend, UploadPolicy};
pub use error::{AppError, LogLevel};
pub use models::{Claims, Trip, UploadedImage};
