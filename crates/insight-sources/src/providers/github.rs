//! GitHub profile scraper with linked-website deep scrape.

use crate::error::{Result, SourceError};
use crate::fingerprint::{browser_headers, random_user_agent};
use crate::model::{LinkedAccount, ScrapedProfile};
use crate::parser::{parse_profile_page, parse_website_accounts};
use crate::source::ProfileScraper;
use async_trait::async_trait;
use insight_core::ScrapeConfig;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const SOURCE_ID: &str = "github";
const PLATFORM: &str = "GitHub";

/// Scrapes a public GitHub profile page.
///
/// Collects name, bio, location, employer and avatar, every social account
/// linked from the profile card, and (optionally) social accounts linked from
/// the personal website found on the card.
pub struct GithubProfileScraper {
    client: Client,
    base_url: String,
    follow_websites: bool,
    website_timeout: Duration,
}

impl GithubProfileScraper {
    /// Create a scraper against github.com with default settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::from_config(&ScrapeConfig::default())
    }

    /// Create a scraper from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(random_user_agent())
            .default_headers(browser_headers())
            .timeout(config.timeout())
            .build()
            .map_err(|e| SourceError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            follow_websites: config.follow_websites,
            website_timeout: config.website_timeout(),
        })
    }

    /// Fetch a linked website and collect the social accounts it links to.
    async fn scrape_website(&self, url: &str) -> Result<Vec<LinkedAccount>> {
        let response = self
            .client
            .get(url)
            .timeout(self.website_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::ApiError {
                source_name: SOURCE_ID.to_string(),
                status: response.status().as_u16(),
                message: format!("website fetch failed for {url}"),
            });
        }

        let html = response.text().await?;
        Ok(parse_website_accounts(&html, url))
    }
}

#[async_trait]
impl ProfileScraper for GithubProfileScraper {
    async fn scrape_profile(&self, username: &str) -> Result<Option<ScrapedProfile>> {
        let profile_url = self.profile_url(username);
        let response = self.client.get(&profile_url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("No {} profile for {}", PLATFORM, username);
            return Ok(None);
        }
        if status != StatusCode::OK {
            return Err(SourceError::ApiError {
                source_name: SOURCE_ID.to_string(),
                status: status.as_u16(),
                message: format!("profile fetch failed for {username}"),
            });
        }

        let html = response.text().await?;
        let page = parse_profile_page(&html, PLATFORM, username, &profile_url);
        let mut profile = page.profile;

        if let (true, Some(website)) = (self.follow_websites, page.website) {
            match self.scrape_website(&website).await {
                Ok(accounts) => {
                    tracing::debug!("Found {} accounts on {}", accounts.len(), website);
                    profile.linked_accounts.extend(accounts);
                    profile.dedup_accounts();
                }
                Err(e) => tracing::debug!("Skipping website {}: {}", website, e),
            }
        }

        Ok(Some(profile))
    }

    fn source_id(&self) -> &str {
        SOURCE_ID
    }

    fn platform(&self) -> &str {
        PLATFORM
    }

    fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(username))
    }
}
