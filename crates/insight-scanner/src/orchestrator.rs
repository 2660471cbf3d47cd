//! Check orchestrator for coordinating the identity sources.
//!
//! This module provides the `CheckOrchestrator` which resolves targets, runs
//! the directory lookup, then runs the breach lookup and profile scrape
//! concurrently. Every source call is bounded by its own timeout, and a
//! failing source only leaves a gap in the report.

use crate::error::{Result, ScanError};
use crate::reconcile::{reconcile, DirectoryStatus, PlatformLinks, SourceOutcomes};
use crate::report::{CheckRequest, CheckResponse, IdentityReport};
use crate::strategy::{self, ResolvedTargets};
use insight_core::{AppConfig, FallbackPolicy, Query};
use insight_sources::{
    BreachLookup, BreachOutcome, DirectoryLookup, DirectoryMember, GithubProfileScraper,
    HibpClient, ProfileScraper, ScrapedProfile, SourceError, WhopDirectoryClient,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound for each source call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTimeouts {
    /// Breach lookup
    pub breach: Duration,
    /// Directory lookup
    pub directory: Duration,
    /// Profile scrape, including the website deep scrape
    pub scrape: Duration,
}

impl Default for SourceTimeouts {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SourceTimeouts {
    fn from(config: &AppConfig) -> Self {
        Self {
            breach: config.breach.timeout(),
            directory: config.directory.timeout(),
            scrape: config.scrape.timeout(),
        }
    }
}

/// Run a source call under a timeout.
async fn bounded<T, F>(source: &str, limit: Duration, call: F) -> insight_sources::Result<T>
where
    F: Future<Output = insight_sources::Result<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| {
            Err(SourceError::Timeout {
                source_name: source.to_string(),
                seconds: limit.as_secs(),
            })
        })
}

/// Orchestrates the sources for one identity check.
pub struct CheckOrchestrator {
    /// Breach disclosure source
    breach: Arc<dyn BreachLookup>,
    /// Membership directory source
    directory: Arc<dyn DirectoryLookup>,
    /// Profile scrape source
    scraper: Arc<dyn ProfileScraper>,
    /// Per-source call limits
    timeouts: SourceTimeouts,
    /// No-evidence behaviour
    fallback_policy: FallbackPolicy,
}

impl CheckOrchestrator {
    /// Create a new orchestrator over the given sources.
    #[must_use]
    pub fn new(
        breach: Arc<dyn BreachLookup>,
        directory: Arc<dyn DirectoryLookup>,
        scraper: Arc<dyn ProfileScraper>,
    ) -> Self {
        Self {
            breach,
            directory,
            scraper,
            timeouts: SourceTimeouts::default(),
            fallback_policy: FallbackPolicy::default(),
        }
    }

    /// Create an orchestrator backed by the HTTP sources described in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let setup = |e: SourceError| ScanError::Setup(e.to_string());

        let breach = HibpClient::from_config(&config.breach).map_err(setup)?;
        if !breach.is_configured() {
            tracing::warn!("HIBP_API_KEY is not set, breach lookups will be unavailable");
        }
        let directory = WhopDirectoryClient::from_config(&config.directory).map_err(setup)?;
        let scraper = GithubProfileScraper::from_config(&config.scrape).map_err(setup)?;

        Ok(
            Self::new(Arc::new(breach), Arc::new(directory), Arc::new(scraper))
                .with_timeouts(SourceTimeouts::from(config))
                .with_fallback_policy(config.report.fallback_policy),
        )
    }

    /// Set the per-source timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: SourceTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the no-evidence behaviour.
    #[must_use]
    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    /// Handle a raw front-end request. Never fails; errors land in the envelope.
    pub async fn check(&self, request: &CheckRequest) -> CheckResponse {
        let result = match request.to_query() {
            Ok(query) => self.run(&query).await,
            Err(e) => Err(e),
        };
        CheckResponse::from_result(request.query.trim(), result)
    }

    /// Produce the report for a validated query.
    pub async fn run(&self, query: &Query) -> Result<IdentityReport> {
        tracing::info!(
            "Checking '{}' (mode: {}, scope: {})",
            query.raw(),
            query.mode(),
            query.scope().map_or("none", |s| s.as_str())
        );

        let outcomes = self.gather(query).await;
        let report = reconcile(query, outcomes, self.fallback_policy);

        match &report {
            Ok(report) => tracing::info!(
                "Report {} for '{}': score {}, {} breaches, {} flags",
                report.id,
                report.query,
                report.risk_score,
                report.breaches.len(),
                report.flags.len()
            ),
            Err(e) => tracing::warn!("No report for '{}': {}", query.raw(), e),
        }

        report
    }

    /// Query every eligible source.
    ///
    /// The directory runs first since a confirmed member changes the breach
    /// and scrape inputs; breach and scrape then run concurrently.
    pub async fn gather(&self, query: &Query) -> SourceOutcomes {
        let (member, directory) = self.lookup_member(query).await;

        let mut targets = strategy::select(query);
        targets.apply_directory(member);
        targets.finalize(query);

        let (breaches, profile) =
            tokio::join!(self.lookup_breaches(&targets), self.scrape(&targets));

        let links = PlatformLinks {
            directory: self.directory.platform().to_string(),
            member_url: targets
                .member
                .as_ref()
                .map(|m| m.username.trim())
                .filter(|username| !username.is_empty())
                .map(|username| self.directory.profile_url(username)),
            scraper: self.scraper.platform().to_string(),
            scrape_url: targets
                .scrape_handle()
                .map(|handle| self.scraper.profile_url(handle)),
        };

        SourceOutcomes {
            targets,
            directory,
            breaches,
            profile,
            links,
        }
    }

    async fn lookup_member(&self, query: &Query) -> (Option<DirectoryMember>, DirectoryStatus) {
        let Some(scope) = query.scope().filter(|_| strategy::directory_eligible(query)) else {
            return (None, DirectoryStatus::Skipped);
        };

        let source = self.directory.source_id();
        let member_query = strategy::member_query(query);
        let result = bounded(
            source,
            self.timeouts.directory,
            self.directory.find_member(scope, &member_query),
        )
        .await;

        match result {
            Ok(member) => {
                tracing::info!(
                    "Directory {} in scope {}: {}",
                    source,
                    scope,
                    if member.is_some() { "member found" } else { "no member" }
                );
                (member, DirectoryStatus::Checked)
            }
            Err(e) => match e.permission_message() {
                Some(message) => {
                    tracing::warn!("Directory {} denied scope {}: {}", source, scope, message);
                    let message = message.to_string();
                    (None, DirectoryStatus::Denied { message })
                }
                None => {
                    tracing::warn!("Directory {} unavailable: {}", source, e);
                    (None, DirectoryStatus::Unavailable)
                }
            },
        }
    }

    async fn lookup_breaches(&self, targets: &ResolvedTargets) -> BreachOutcome {
        let Some(account) = targets.breach_account() else {
            return BreachOutcome::Unavailable;
        };

        let source = self.breach.source_id();
        match bounded(
            source,
            self.timeouts.breach,
            self.breach.lookup_breaches(account),
        )
        .await
        {
            Ok(outcome) => {
                match &outcome {
                    BreachOutcome::Found(records) => {
                        tracing::info!("Breach source {}: {} breaches", source, records.len());
                    }
                    BreachOutcome::Empty => {
                        tracing::info!("Breach source {}: no breaches", source);
                    }
                    BreachOutcome::Unavailable => {
                        tracing::warn!("Breach source {} unavailable", source);
                    }
                }
                outcome
            }
            Err(e) => {
                tracing::warn!("Breach source {} unavailable: {}", source, e);
                BreachOutcome::Unavailable
            }
        }
    }

    async fn scrape(&self, targets: &ResolvedTargets) -> Option<ScrapedProfile> {
        let handle = targets.scrape_handle()?;

        let source = self.scraper.source_id();
        match bounded(
            source,
            self.timeouts.scrape,
            self.scraper.scrape_profile(handle),
        )
        .await
        {
            Ok(Some(profile)) => {
                tracing::info!(
                    "Scraped {} profile for {}: {} linked accounts",
                    source,
                    handle,
                    profile.linked_accounts.len()
                );
                Some(profile)
            }
            Ok(None) => {
                tracing::info!("No {} profile for {}", source, handle);
                None
            }
            Err(e) => {
                tracing::warn!("Scrape {} failed for {}: {}", source, handle, e);
                None
            }
        }
    }
}
