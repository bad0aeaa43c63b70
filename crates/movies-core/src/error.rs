//! Unified error types for all layers of the movies API.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the movies API.
///
/// Cache failures are represented here so that callers can log them, but the
/// memoization layer never lets a `Cache` error escape to its caller.
#[derive(Error, Debug)]
pub enum MoviesError {
    // ============ Domain Errors ============
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External service error (search backend)
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Value could not be converted to or from its cached form
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MoviesError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an error for a failed call to an external service.
    #[must_use]
    pub fn external<S: Into<String>, M: ToString>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

impl From<serde_json::Error> for MoviesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON serialization error: {}", err))
    }
}
