//! Custom error types for AddonHub
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for AddonHub operations
#[derive(Error, Debug)]
pub enum AddonHubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV table errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The acting user lacks the team role required for an operation
    #[error("Unauthorized: {0}")]
    NotAuthorized(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Audit store errors
    #[error("Audit error: {0}")]
    Audit(String),
}

impl AddonHubError {
    /// Create a "not found" error for add-ons
    pub fn addon_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Addon",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authorization error
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Self::NotAuthorized(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for AddonHubError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AddonHubError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for AddonHubError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for AddonHub operations
pub type AddonHubResult<T> = Result<T, AddonHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AddonHubError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = AddonHubError::addon_not_found("bloodfx_1");
        assert_eq!(err.to_string(), "Addon not found: bloodfx_1");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_authorized_error() {
        let err = AddonHubError::NotAuthorized("team role required".into());
        assert_eq!(err.to_string(), "Unauthorized: team role required");
        assert!(err.is_not_authorized());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let hub_err: AddonHubError = io_err.into();
        assert!(matches!(hub_err, AddonHubError::Io(_)));
    }
}
