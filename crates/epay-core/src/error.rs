//! # API Error Types
//!
//! Typed error handling for the epay backend.
//! All fallible operations return `Result<T, ApiError>`.

use thiserror::Error;

/// Core error type for all backend operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed request input
    #[error("{0}")]
    Validation(String),

    /// Unknown local identifier
    #[error("{0}")]
    NotFound(String),

    /// Upstream gateway reported an error; status mirrors the gateway's code
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Network-level failure reaching the gateway (connect, TLS, timeout)
    #[error("{0}")]
    Unavailable(String),

    /// Any other unexpected failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Configuration(_) => 500,
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Unavailable(_) => 503,
            ApiError::Internal(_) => 500,
        }
    }
}

/// Result type alias for backend operations
pub type ApiResult<T> = Result<T, ApiError>;
