//! Error types for the IdeaRelay application.

use thiserror::Error;

/// A shared error type for the entire IdeaRelay application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Each variant corresponds to
/// one class of the request-boundary error taxonomy: validation errors are
/// rejected before any collaborator call, configuration errors name the
/// missing service, and collaborator errors are retryable by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Caller input rejected before reaching any collaborator
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required external service is not configured
    #[error("{service} service is not configured")]
    NotConfigured { service: &'static str },

    /// An external collaborator (LLM, mail transport) failed
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotConfigured error
    pub fn not_configured(service: &'static str) -> Self {
        Self::NotConfigured { service }
    }

    /// Creates a Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotConfigured error
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }

    /// Check if this is a Collaborator error
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for RelayError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RelayError>`.
pub type Result<T> = std::result::Result<T, RelayError>;
