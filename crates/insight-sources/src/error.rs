//! Error types for the source collaborators.

use thiserror::Error;

/// Errors that can occur while querying an external source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// No credential configured for a source that requires one
    #[error("no credentials configured for {source_name}")]
    MissingCredentials {
        /// Source identifier
        source_name: String,
    },

    /// The source explicitly refused access for the requested scope
    #[error("permission denied by {source_name}: {message}")]
    PermissionDenied {
        /// Source identifier
        source_name: String,
        /// Message reported by the source
        message: String,
    },

    /// API error with status code
    #[error("API error ({source_name}): status {status}, {message}")]
    ApiError {
        /// Source identifier
        source_name: String,
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Response parsing error
    #[error("failed to parse response from {source_name}: {message}")]
    ParseError {
        /// Source identifier
        source_name: String,
        /// Error message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Timeout error
    #[error("{source_name} timed out after {seconds}s")]
    Timeout {
        /// Source identifier
        source_name: String,
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl SourceError {
    /// The permission-denied message, if this is a permission error.
    #[must_use]
    pub fn permission_message(&self) -> Option<&str> {
        match self {
            Self::PermissionDenied { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
