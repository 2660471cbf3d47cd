use thiserror::Error;

/// Request-level failures that produce no report.
///
/// Source failures never appear here; they are absorbed by the orchestrator
/// and show up as gaps in the report instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Please enter an Email, Username, or ID")]
    EmptyQuery,

    /// Directory refused the scope and nothing else was found.
    #[error("{message}")]
    PermissionDenied { message: String },

    /// Strict fallback policy and no evidence from any source.
    #[error("No results found for {query}")]
    NoResults { query: String },

    /// A source client could not be constructed.
    #[error("Failed to initialize source: {0}")]
    Setup(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
