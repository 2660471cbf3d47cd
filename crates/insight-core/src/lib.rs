//! Insight Core - Foundation crate for the Insight identity risk checker.
//!
//! This crate provides shared types, error handling and configuration
//! management that the other Insight crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Request newtypes and enums (`Query`, `SearchMode`, `ScopeId`, `Timestamp`)
//!
//! # Example
//!
//! ```rust
//! use insight_core::{AppConfig, Query, ScopeId, SearchMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert!(config.breach.api_key.is_none());
//!
//! let query = Query::new("octocat")?
//!     .with_scope(ScopeId::new("biz_example")?)
//!     .with_mode(SearchMode::Auto);
//! assert!(!query.is_email_shaped());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    ApiKey, AppConfig, BreachConfig, DirectoryConfig, FallbackPolicy, ReportConfig, ScrapeConfig,
};
pub use error::{ConfigError, ConfigResult, InsightError};
pub use types::{
    is_email_shaped, local_part, Query, RequestId, ScopeId, SearchMode, Timestamp,
    MEMBER_ID_PREFIX,
};
