//! Insight Scanner - identity check pipeline.
//!
//! This crate turns one operator query into one [`IdentityReport`]. It decides
//! which identifiers each source is queried with, runs the sources with
//! per-source timeouts and graceful degradation, and reconciles what came back
//! into a scored report with advisory flags.
//!
//! # Pipeline
//!
//! - [`strategy`]: resolves the email and username targets, seeded by a
//!   confirmed directory member when there is one
//! - [`orchestrator`]: directory lookup first, then breach lookup and profile
//!   scrape concurrently
//! - [`reconcile`]: field priority, risk score, flags and the social list,
//!   falling back to deterministic placeholder data when nothing was found
//!
//! # Example
//!
//! ```rust,no_run
//! use insight_core::AppConfig;
//! use insight_scanner::{CheckOrchestrator, CheckRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load_with_env(None)?;
//! let orchestrator = CheckOrchestrator::from_config(&config)?;
//!
//! let response = orchestrator.check(&CheckRequest::new("octocat")).await;
//! if let Some(report) = response.data {
//!     println!("risk score {}", report.risk_score);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod reconcile;
pub mod report;
pub mod strategy;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use orchestrator::{CheckOrchestrator, SourceTimeouts};
pub use reconcile::{reconcile, DirectoryStatus, PlatformLinks, SourceOutcomes};
pub use report::{
    CheckRequest, CheckResponse, Flag, IdentityReport, IdentitySummary, ReportStatus, Severity,
    SocialProfile,
};
pub use strategy::ResolvedTargets;
