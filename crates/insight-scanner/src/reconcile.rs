//! Merges source outcomes into one report: field priority, scoring, flags and
//! the synthetic fallback.

use crate::error::{Result, ScanError};
use crate::fallback;
use crate::report::{
    Flag, IdentityReport, IdentitySummary, ReportStatus, Severity, SocialProfile,
};
use crate::strategy::ResolvedTargets;
use insight_core::{FallbackPolicy, Query, RequestId, Timestamp};
use insight_sources::{BreachOutcome, BreachRecord, ScrapedProfile};

const UNKNOWN: &str = "Unknown";
const NOT_FOUND: &str = "Not found";
const CHECK_MANUALLY: &str = "Check manually";
const NO_URL: &str = "#";
const MANUAL_PLATFORMS: [&str; 2] = ["Twitter", "LinkedIn"];

/// Points per reported breach.
const BREACH_WEIGHT: u32 = 15;
/// Score with zero breaches.
const BASE_SCORE: u32 = 10;
/// Reduction for a confirmed directory member.
const MEMBER_DISCOUNT: u8 = 20;
/// Upper bound for every score.
pub const MAX_SCORE: u8 = 99;
/// Breach counts above this are high severity.
const HIGH_SEVERITY_BREACHES: usize = 5;

/// How the directory lookup went.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DirectoryStatus {
    /// Not eligible for this query
    #[default]
    Skipped,
    /// Lookup answered; the member (if any) is on the targets
    Checked,
    /// The scope refused access
    Denied {
        /// Message from the directory
        message: String,
    },
    /// Error, missing credentials or timeout
    Unavailable,
}

impl DirectoryStatus {
    /// Permission message, if the scope refused access.
    #[must_use]
    pub fn denial(&self) -> Option<&str> {
        match self {
            Self::Denied { message } => Some(message),
            _ => None,
        }
    }
}

/// Platform labels and URLs supplied by the collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLinks {
    /// Directory platform label
    pub directory: String,
    /// Profile URL of the confirmed member
    pub member_url: Option<String>,
    /// Scraped platform label
    pub scraper: String,
    /// Profile URL for the scrape handle
    pub scrape_url: Option<String>,
}

impl Default for PlatformLinks {
    fn default() -> Self {
        Self {
            directory: "Whop".to_string(),
            member_url: None,
            scraper: "GitHub".to_string(),
            scrape_url: None,
        }
    }
}

/// Everything the sources returned for one request.
#[derive(Debug, Clone, Default)]
pub struct SourceOutcomes {
    /// Resolved identifiers, including the confirmed member
    pub targets: ResolvedTargets,
    /// Directory lookup status
    pub directory: DirectoryStatus,
    /// Breach lookup result
    pub breaches: BreachOutcome,
    /// Scraped profile
    pub profile: Option<ScrapedProfile>,
    /// Platform labels and URLs
    pub links: PlatformLinks,
}

impl SourceOutcomes {
    /// Whether any source contributed real data.
    #[must_use]
    pub fn has_evidence(&self) -> bool {
        self.targets.member.is_some()
            || !self.breaches.is_unavailable()
            || self.profile.as_ref().is_some_and(ScrapedProfile::has_content)
    }
}

/// First candidate that is present and not blank.
#[must_use]
pub fn first_present<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// `min(10 + 15 * count, 99)`, less 20 (floored at 0) for a confirmed member.
#[must_use]
pub fn risk_score(breach_count: usize, member_confirmed: bool) -> u8 {
    let count = u32::try_from(breach_count).unwrap_or(u32::MAX);
    let base = count
        .saturating_mul(BREACH_WEIGHT)
        .saturating_add(BASE_SCORE)
        .min(u32::from(MAX_SCORE));
    let base = u8::try_from(base).unwrap_or(MAX_SCORE);
    if member_confirmed {
        base.saturating_sub(MEMBER_DISCOUNT)
    } else {
        base
    }
}

/// The breach-history flag for a list of breaches.
#[must_use]
pub fn breach_flag(breaches: &[BreachRecord]) -> Flag {
    match breaches.len() {
        0 => Flag::new(Severity::Low, "Info", "Clean breach history."),
        n => Flag::new(
            if n > HIGH_SEVERITY_BREACHES {
                Severity::High
            } else {
                Severity::Medium
            },
            "Breach History",
            format!("Found {n} known data breaches associated with this identity."),
        ),
    }
}

fn derive_flags(outcomes: &SourceOutcomes, breaches: &[BreachRecord]) -> Vec<Flag> {
    let mut flags = vec![breach_flag(breaches)];

    if let Some(member) = &outcomes.targets.member {
        let description = match member.joined_at {
            Some(joined) => format!("Confirmed member since {}.", joined.format("%Y-%m-%d")),
            None => "Confirmed member of this company.".to_string(),
        };
        flags.push(Flag::new(Severity::Low, "Verified Member", description));
    }

    if let Some(message) = outcomes.directory.denial() {
        flags.push(Flag::new(Severity::Medium, "Integration Warning", message));
    }

    flags
}

fn social_profiles(outcomes: &SourceOutcomes, evidence: bool) -> Vec<SocialProfile> {
    let links = &outcomes.links;
    let member = outcomes.targets.member.as_ref();

    let mut social = vec![SocialProfile::new(
        links.directory.as_str(),
        first_present([member.map(|m| m.username.as_str())]).unwrap_or(NOT_FOUND),
        links.member_url.as_deref().unwrap_or(NO_URL),
        member.is_some(),
    )];

    let accounts = outcomes
        .profile
        .as_ref()
        .map(|p| p.linked_accounts.as_slice())
        .unwrap_or_default();
    social.extend(accounts.iter().map(|a| {
        SocialProfile::new(a.platform.as_str(), a.username.as_str(), a.url.as_str(), true)
    }));

    let found_on = |platform: &str| {
        outcomes
            .profile
            .as_ref()
            .is_some_and(|p| p.has_account_on(platform))
    };

    if let (true, false, Some(username)) = (
        evidence,
        found_on(links.scraper.as_str()),
        outcomes.targets.scrape_handle(),
    ) {
        social.push(SocialProfile::new(
            links.scraper.as_str(),
            username,
            links.scrape_url.as_deref().unwrap_or(NO_URL),
            false,
        ));
    }

    for platform in MANUAL_PLATFORMS {
        if !found_on(platform) {
            social.push(SocialProfile::new(platform, CHECK_MANUALLY, NO_URL, false));
        }
    }

    social
}

fn identity(query: &Query, outcomes: &SourceOutcomes) -> IdentitySummary {
    let profile = outcomes.profile.as_ref();
    let member = outcomes.targets.member.as_ref();
    let username = outcomes.targets.username.as_deref();

    let full_name = first_present([
        profile.and_then(|p| p.full_name.as_deref()),
        member.and_then(|m| m.full_name.as_deref()),
        username,
        Some(query.raw()),
    ])
    .unwrap_or(query.raw());

    let avatar = first_present([profile.and_then(|p| p.avatar_url.as_deref())])
        .map_or_else(
            || fallback::avatar_url(first_present([username]).unwrap_or(query.raw())),
            str::to_string,
        );

    IdentitySummary {
        full_name: full_name.to_string(),
        age_range: UNKNOWN.to_string(),
        location: first_present([profile.and_then(|p| p.location.as_deref())])
            .unwrap_or(UNKNOWN)
            .to_string(),
        job_title: first_present([profile.and_then(|p| p.employer.as_deref())])
            .unwrap_or(UNKNOWN)
            .to_string(),
        avatar,
    }
}

fn assemble(
    query: &Query,
    risk_score: u8,
    identity: IdentitySummary,
    social: Vec<SocialProfile>,
    breaches: Vec<BreachRecord>,
    flags: Vec<Flag>,
) -> IdentityReport {
    IdentityReport {
        id: RequestId::generate(),
        query: query.raw().to_string(),
        timestamp: Timestamp::now(),
        status: ReportStatus::Complete,
        risk_score: risk_score.min(MAX_SCORE),
        identity,
        social,
        breaches,
        flags,
    }
}

/// Build the report for a query from what the sources returned.
///
/// # Errors
/// - [`ScanError::PermissionDenied`] when the directory refused access and no
///   other source found anything
/// - [`ScanError::NoResults`] when nothing was found under
///   [`FallbackPolicy::Strict`]
pub fn reconcile(
    query: &Query,
    outcomes: SourceOutcomes,
    policy: FallbackPolicy,
) -> Result<IdentityReport> {
    let evidence = outcomes.has_evidence();

    if !evidence {
        if let Some(message) = outcomes.directory.denial() {
            return Err(ScanError::PermissionDenied {
                message: message.to_string(),
            });
        }
        if policy == FallbackPolicy::Strict {
            return Err(ScanError::NoResults {
                query: query.raw().to_string(),
            });
        }

        tracing::debug!("No evidence for '{}', using placeholder report", query.raw());
        let breaches = fallback::breaches(query);
        let flags = vec![breach_flag(&breaches)];
        return Ok(assemble(
            query,
            fallback::risk_score(query),
            fallback::identity(query),
            social_profiles(&outcomes, false),
            breaches,
            flags,
        ));
    }

    let breaches = outcomes.breaches.records().to_vec();
    let score = risk_score(breaches.len(), outcomes.targets.member.is_some());
    let flags = derive_flags(&outcomes, &breaches);

    Ok(assemble(
        query,
        score,
        identity(query, &outcomes),
        social_profiles(&outcomes, true),
        breaches,
        flags,
    ))
}
