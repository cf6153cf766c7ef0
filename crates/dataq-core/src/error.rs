//! Error types for explorer operations.
//!
//! This module provides the error hierarchy shared by the query-builder
//! engine, including error code mapping and conversions from the external
//! libraries the engine builds on.

use thiserror::Error;

/// Main error type for explorer operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Base href is malformed
    #[error("Invalid base href: {0}")]
    InvalidBaseHref(String),

    /// Output format value could not be interpreted
    #[error("Invalid output format: {0}")]
    InvalidFormat(String),

    /// Persistent store read or write failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Persisted data could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Specialized result type for explorer operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidBaseHref(_) => "INVALID_BASE_HREF",
            Self::InvalidFormat(_) => "INVALID_FORMAT",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Returns true if this error should be logged as a serious error.
    ///
    /// Storage failures qualify: a swallowed store failure loses saved
    /// queries with no visible trace.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(self, Self::StorageError(_) | Self::ConfigError(_))
    }
}

// Conversions from external error types
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::InvalidBaseHref("test".to_string()).error_code(),
            "INVALID_BASE_HREF"
        );
        assert_eq!(
            Error::InvalidFormat("test".to_string()).error_code(),
            "INVALID_FORMAT"
        );
        assert_eq!(
            Error::StorageError("test".to_string()).error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            Error::SerializationError("test".to_string()).error_code(),
            "SERIALIZATION_ERROR"
        );
        assert_eq!(
            Error::ValidationError("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::StorageError("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage error: quota exceeded");

        let err = Error::InvalidBaseHref("api".to_string());
        assert_eq!(err.to_string(), "Invalid base href: api");
    }

    #[test]
    fn test_should_log() {
        assert!(Error::StorageError("test".to_string()).should_log());
        assert!(Error::ConfigError("test".to_string()).should_log());

        assert!(!Error::InvalidFormat("test".to_string()).should_log());
        assert!(!Error::ValidationError("test".to_string()).should_log());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let explorer_err: Error = err.into();
        assert!(matches!(explorer_err, Error::SerializationError(_)));
        assert_eq!(explorer_err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_error_clone_and_eq() {
        let err = Error::InvalidFormat("test".to_string());
        let cloned = err.clone();
        assert_eq!(err, cloned);

        let other = Error::InvalidFormat("other".to_string());
        assert_ne!(err, other);
    }
}
