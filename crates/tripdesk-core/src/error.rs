//! Error types module
//!
//! All errors are unified under the `AppError` enum, which covers
//! authentication, input validation, storage, and internal failures. The API
//! crate maps each variant onto an HTTP status and a client-facing body; the
//! mapping metadata lives here so it stays next to the variants.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Unauthorized(_) => 401,
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Storage(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    /// Whether the internal message is safe to echo to clients.
    ///
    /// Storage and internal failures carry backend detail (endpoints, key
    /// names, transport errors) that must stay in the logs; clients get a
    /// fixed generic message instead.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, AppError::Storage(_) | AppError::Internal(_))
    }

    /// Message to put in the response body.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Storage(_) => "Failed to upload image".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Unauthorized(_) => LogLevel::Warn,
            AppError::InvalidInput(_) | AppError::NotFound(_) | AppError::Conflict(_) => {
                LogLevel::Debug
            }
            AppError::PayloadTooLarge(_) => LogLevel::Debug,
            AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }

    /// Short variant name for structured log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Storage(_) => "storage",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}
