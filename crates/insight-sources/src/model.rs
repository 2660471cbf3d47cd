//! Records returned by the source collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalize scraped or API text: trimmed, `None` when empty.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One member matched in the membership directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryMember {
    /// Directory member identifier
    pub id: String,
    /// Platform username
    pub username: String,
    /// Display name, if the member set one
    pub full_name: Option<String>,
    /// Email, if the scope is allowed to read it
    pub email: Option<String>,
    /// When the member joined the scope
    pub joined_at: Option<DateTime<Utc>>,
}

/// A single disclosed breach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    /// Breach name
    pub name: String,
    /// Disclosure date (YYYY-MM-DD)
    pub date: String,
    /// Plain-text description
    pub description: String,
}

impl BreachRecord {
    /// Create a breach record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            description: description.into(),
        }
    }
}

/// Result of a breach lookup.
///
/// `Empty` is confirmed negative evidence and is distinct from `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BreachOutcome {
    /// No credentials, transport failure or upstream error
    #[default]
    Unavailable,
    /// The source confirmed zero breaches
    Empty,
    /// One or more breaches reported
    Found(Vec<BreachRecord>),
}

impl BreachOutcome {
    /// Build an outcome from a verified list of records.
    #[must_use]
    pub fn from_records(records: Vec<BreachRecord>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Found(records)
        }
    }

    /// Whether the lookup produced no usable answer.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Records actually reported (empty unless `Found`).
    #[must_use]
    pub fn records(&self) -> &[BreachRecord] {
        match self {
            Self::Found(records) => records,
            Self::Unavailable | Self::Empty => &[],
        }
    }
}

/// An account on another platform discovered during a profile scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccount {
    /// Platform display name (e.g. "GitHub", "Twitter")
    pub platform: String,
    /// Username on that platform
    pub username: String,
    /// Profile URL
    pub url: String,
}

/// Profile data collected by a scraper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedProfile {
    /// Display name
    pub full_name: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Employer / company
    pub employer: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Short biography
    pub bio: Option<String>,
    /// Personal website
    pub website: Option<String>,
    /// Other accounts linked from the profile
    pub linked_accounts: Vec<LinkedAccount>,
}

impl ScrapedProfile {
    /// Whether the profile carries anything usable as evidence.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.full_name.as_deref().is_some_and(|n| !n.trim().is_empty())
            || !self.linked_accounts.is_empty()
    }

    /// Whether a linked account exists on the given platform (case-insensitive).
    #[must_use]
    pub fn has_account_on(&self, platform: &str) -> bool {
        self.linked_accounts
            .iter()
            .any(|a| a.platform.eq_ignore_ascii_case(platform))
    }

    /// Drop duplicate linked accounts, keyed by platform and URL without trailing slash.
    pub fn dedup_accounts(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.linked_accounts.retain(|account| {
            seen.insert((
                account.platform.clone(),
                account.url.trim_end_matches('/').to_string(),
            ))
        });
    }
}
