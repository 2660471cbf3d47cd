//! Identity report model and the request/response envelope around it.

use crate::error::{Result, ScanError};
use insight_core::{Query, RequestId, ScopeId, SearchMode, Timestamp};
use insight_sources::BreachRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Assembled and returned
    Complete,
    /// Could not be assembled
    Failed,
    /// Still being assembled
    Processing,
}

/// Advisory severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Low,
    /// Worth a look
    Medium,
    /// Needs attention
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// An advisory annotation shown alongside the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// How much attention the flag deserves
    pub severity: Severity,
    /// Short category label
    #[serde(rename = "type")]
    pub category: String,
    /// Human-readable explanation
    pub description: String,
}

impl Flag {
    /// Create a flag.
    #[must_use]
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            description: description.into(),
        }
    }
}

/// Resolved identity fields. Unresolved fields read `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    /// Display name
    pub full_name: String,
    /// Age bracket
    pub age_range: String,
    /// Free-text location
    pub location: String,
    /// Job title / employer
    pub job_title: String,
    /// Avatar image URL
    pub avatar: String,
}

/// One row in the social-profile list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    /// Platform display name
    pub platform: String,
    /// Username, or a placeholder such as `Not found`
    pub username: String,
    /// Profile URL, or `#` when there is none
    pub url: String,
    /// Whether the account was confirmed to exist
    pub exists: bool,
}

impl SocialProfile {
    /// Create a social-profile row.
    #[must_use]
    pub fn new(
        platform: impl Into<String>,
        username: impl Into<String>,
        url: impl Into<String>,
        exists: bool,
    ) -> Self {
        Self {
            platform: platform.into(),
            username: username.into(),
            url: url.into(),
            exists,
        }
    }
}

/// The consolidated identity risk report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityReport {
    /// Unique per request
    pub id: RequestId,
    /// Echo of the raw query
    pub query: String,
    /// When the report was assembled
    pub timestamp: Timestamp,
    /// Lifecycle state
    pub status: ReportStatus,
    /// Risk score in `0..=99`
    pub risk_score: u8,
    /// Resolved identity
    pub identity: IdentitySummary,
    /// Ordered social-profile rows
    pub social: Vec<SocialProfile>,
    /// Breach records (real or synthetic)
    pub breaches: Vec<BreachRecord>,
    /// Ordered advisory flags
    pub flags: Vec<Flag>,
}

impl IdentityReport {
    /// Whether two reports carry the same content, ignoring id and timestamp.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.query == other.query
            && self.status == other.status
            && self.risk_score == other.risk_score
            && self.identity == other.identity
            && self.social == other.social
            && self.breaches == other.breaches
            && self.flags == other.flags
    }
}

/// Raw operator input as submitted by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Email, username or member ID
    pub query: String,
    /// Company / tenant scope for the directory lookup
    #[serde(default)]
    pub scope: Option<String>,
    /// Explicit search mode
    #[serde(default)]
    pub mode: Option<SearchMode>,
}

impl CheckRequest {
    /// Create a request for a bare query.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Validate into a [`Query`].
    ///
    /// A blank scope is treated as absent. A malformed scope is dropped with a
    /// warning, which leaves the directory ineligible for this request.
    pub fn to_query(&self) -> Result<Query> {
        let query = Query::new(self.query.as_str()).map_err(|_| ScanError::EmptyQuery)?;

        let scope = match self.scope.as_deref().map(str::trim) {
            Some(scope) if !scope.is_empty() => match ScopeId::new(scope) {
                Ok(scope) => Some(scope),
                Err(e) => {
                    tracing::warn!("Ignoring scope {:?}: {}", scope, e);
                    None
                }
            },
            _ => None,
        };

        let query = query.with_mode(self.mode.unwrap_or_default());
        Ok(match scope {
            Some(scope) => query.with_scope(scope),
            None => query,
        })
    }
}

/// What a front end renders: exactly one of `error` or `data` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    /// User-visible failure message
    pub error: Option<String>,
    /// Echo of the submitted query for re-display
    pub query: String,
    /// The report on success
    pub data: Option<IdentityReport>,
}

impl CheckResponse {
    /// Wrap a pipeline result.
    #[must_use]
    pub fn from_result(query: impl Into<String>, result: Result<IdentityReport>) -> Self {
        let query = query.into();
        match result {
            Ok(report) => Self {
                error: None,
                query,
                data: Some(report),
            },
            Err(e) => Self {
                error: Some(e.to_string()),
                query,
                data: None,
            },
        }
    }

    /// Whether a report was produced.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}
