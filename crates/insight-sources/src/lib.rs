//! Insight Sources - external data source collaborators.
//!
//! This crate defines the three collaborator traits the scan pipeline consumes
//! and ships an HTTP implementation for each:
//!
//! - **Breach lookup** ([`BreachLookup`], [`HibpClient`]): breaches keyed by email,
//!   with a three-state [`BreachOutcome`] that keeps "verified empty" distinct
//!   from "unavailable"
//! - **Directory lookup** ([`DirectoryLookup`], [`WhopDirectoryClient`]): at most
//!   one member of a company scope, with a distinguished permission error
//! - **Profile scrape** ([`ProfileScraper`], [`GithubProfileScraper`]): profile
//!   fields plus linked accounts, including a one-level website deep scrape
//!
//! # Example
//!
//! ```rust,no_run
//! use insight_sources::{BreachLookup, BreachOutcome, HibpClient};
//! use insight_core::ApiKey;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HibpClient::new(Some(ApiKey::new("hibp-key")))?;
//! match client.lookup_breaches("someone@example.com").await? {
//!     BreachOutcome::Found(records) => println!("{} breaches", records.len()),
//!     BreachOutcome::Empty => println!("clean"),
//!     BreachOutcome::Unavailable => println!("unknown"),
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

pub mod error;
#[allow(missing_docs)]
pub mod fingerprint;
pub mod model;
pub mod parser;
pub mod platform;
pub mod providers;
pub mod source;

// Re-export commonly used types
pub use error::{Result, SourceError};
pub use model::{BreachOutcome, BreachRecord, DirectoryMember, LinkedAccount, ScrapedProfile};
pub use providers::{GithubProfileScraper, HibpClient, WhopDirectoryClient};
pub use source::{BreachLookup, DirectoryLookup, MemberQuery, ProfileScraper};
