//! Shared types used across the Insight workspace.
//!
//! This module defines the request-side newtypes and enums that every
//! pipeline stage agrees on: the operator's [`Query`], the [`SearchMode`]
//! that restricts which sources may run, and a few identifier wrappers.

use crate::error::InsightError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix used by the membership directory for member/user identifiers.
pub const MEMBER_ID_PREFIX: &str = "user_";

/// Returns true if the string looks like an email address.
///
/// The check is intentionally loose: anything containing `@` is treated as
/// email-shaped and routed to email-keyed sources.
#[must_use]
pub fn is_email_shaped(value: &str) -> bool {
    value.contains('@')
}

/// Strip the domain portion from an email-shaped string.
///
/// Non-email input is returned unchanged.
#[must_use]
pub fn local_part(value: &str) -> &str {
    value.split('@').next().unwrap_or(value)
}

/// Newtype for per-request report identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new random `RequestId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for directory scope identifiers (company / tenant IDs).
///
/// Scope IDs must be 3-64 characters of ASCII alphanumerics, `_` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(String);

impl ScopeId {
    /// Create a new `ScopeId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, InsightError> {
        let id = id.into().trim().to_string();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), InsightError> {
        static SCOPE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = SCOPE_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{3,64}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(InsightError::Validation(format!(
                "invalid scope ID: must be 3-64 alphanumeric, '_' or '-' characters, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operator-selected restriction on which sources may run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Let the selector decide from the shape of the query.
    #[default]
    Auto,
    /// Directory-oriented lookup (requires a scope).
    #[serde(alias = "whop")]
    Directory,
    /// Only username-keyed sources (profile scrape).
    #[serde(alias = "github")]
    UsernameSource,
    /// Only email-keyed sources (breach lookup).
    #[serde(alias = "email")]
    EmailOnly,
}

impl SearchMode {
    /// Whether the directory lookup may run under this mode.
    #[must_use]
    pub fn allows_directory(self) -> bool {
        matches!(self, Self::Auto | Self::Directory)
    }

    /// Whether username-shaped sources (profile scrape) may run.
    #[must_use]
    pub fn allows_username_sources(self) -> bool {
        !matches!(self, Self::EmailOnly)
    }

    /// Whether email-shaped sources (breach lookup) may run.
    #[must_use]
    pub fn allows_email_sources(self) -> bool {
        !matches!(self, Self::UsernameSource)
    }

    /// Canonical kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Directory => "directory",
            Self::UsernameSource => "username-source",
            Self::EmailOnly => "email-only",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "directory" | "whop" => Ok(Self::Directory),
            "username-source" | "github" => Ok(Self::UsernameSource),
            "email-only" | "email" => Ok(Self::EmailOnly),
            other => Err(InsightError::Validation(format!(
                "unknown search mode '{other}' (expected auto, directory, username-source or email-only)"
            ))),
        }
    }
}

/// Immutable operator input for one report request.
///
/// Only constructible through [`Query::new`], so the raw text is always
/// trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    scope: Option<ScopeId>,
    mode: SearchMode,
}

impl Query {
    /// Build a query from raw operator text.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// Returns [`InsightError::Validation`] if the text is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, InsightError> {
        let raw = raw.into().trim().to_string();
        if raw.is_empty() {
            return Err(InsightError::Validation(
                "query must not be empty".to_string(),
            ));
        }
        Ok(Self {
            raw,
            scope: None,
            mode: SearchMode::Auto,
        })
    }

    /// Attach a directory scope.
    #[must_use]
    pub fn with_scope(mut self, scope: ScopeId) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set an explicit search mode.
    #[must_use]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// The trimmed raw identifier.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Optional directory scope.
    #[must_use]
    pub fn scope(&self) -> Option<&ScopeId> {
        self.scope.as_ref()
    }

    /// Effective search mode.
    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Whether the raw text contains `@`.
    #[must_use]
    pub fn is_email_shaped(&self) -> bool {
        is_email_shaped(&self.raw)
    }

    /// Whether the raw text follows the directory member-ID convention.
    #[must_use]
    pub fn is_member_id(&self) -> bool {
        self.raw.starts_with(MEMBER_ID_PREFIX)
    }

    /// Length of the raw text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.raw.chars().count()
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
