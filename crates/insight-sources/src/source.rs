//! Collaborator traits consumed by the scan pipeline.
//!
//! Each external data source sits behind one of these traits so the
//! orchestrator can be driven by real HTTP clients or by fixed fakes.

use crate::error::Result;
use crate::model::{BreachOutcome, DirectoryMember, ScrapedProfile};
use async_trait::async_trait;
use insight_core::ScopeId;

/// Breach-disclosure lookup keyed by an email-shaped account identifier.
#[async_trait]
pub trait BreachLookup: Send + Sync {
    /// Look up breaches for an account.
    ///
    /// Implementations return `Ok(BreachOutcome::Unavailable)` when they have no
    /// credentials, and `Ok(BreachOutcome::Empty)` only when the upstream
    /// confirmed zero breaches.
    async fn lookup_breaches(&self, account: &str) -> Result<BreachOutcome>;

    /// Identifier used in logs.
    fn source_id(&self) -> &str;
}

/// How to search the membership directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberQuery {
    /// Free-text search
    Text(String),
    /// Exact member/user identifiers
    Ids(Vec<String>),
}

/// Membership directory lookup within a scope.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Find the first member matching the query, if any.
    ///
    /// # Errors
    /// Returns [`crate::SourceError::PermissionDenied`] when the scope is not
    /// authorized, and other variants for transport or API failures.
    async fn find_member(
        &self,
        scope: &ScopeId,
        query: &MemberQuery,
    ) -> Result<Option<DirectoryMember>>;

    /// Identifier used in logs.
    fn source_id(&self) -> &str;

    /// Platform name shown in reports.
    fn platform(&self) -> &str {
        "Whop"
    }

    /// Public profile URL for a member username.
    fn profile_url(&self, username: &str) -> String {
        format!("https://whop.com/@{username}")
    }
}

/// Profile scrape keyed by a username.
#[async_trait]
pub trait ProfileScraper: Send + Sync {
    /// Scrape a profile. `Ok(None)` means the profile does not exist.
    async fn scrape_profile(&self, username: &str) -> Result<Option<ScrapedProfile>>;

    /// Identifier used in logs.
    fn source_id(&self) -> &str;

    /// Platform name shown in reports.
    fn platform(&self) -> &str {
        "GitHub"
    }

    /// Public profile URL for a username.
    fn profile_url(&self, username: &str) -> String {
        format!("https://github.com/{username}")
    }
}
