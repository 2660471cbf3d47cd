//! Have I Been Pwned breach lookup client.

use crate::error::{Result, SourceError};
use crate::model::{BreachOutcome, BreachRecord};
use crate::source::BreachLookup;
use async_trait::async_trait;
use insight_core::{ApiKey, BreachConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const SOURCE_ID: &str = "hibp";

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid HTML tag regex"));

/// Remove HTML markup from a breach description.
#[must_use]
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").trim().to_string()
}

/// Breach lookup against the HIBP v3 `breachedaccount` endpoint.
///
/// Without an API key every lookup reports [`BreachOutcome::Unavailable`].
pub struct HibpClient {
    api_key: Option<ApiKey>,
    client: Client,
    base_url: String,
    user_agent: String,
}

impl HibpClient {
    /// Create a client against the public API with default settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: Option<ApiKey>) -> Result<Self> {
        Self::from_config(&BreachConfig {
            api_key,
            ..BreachConfig::default()
        })
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &BreachConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SourceError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Whether a credential is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HibpBreach {
    name: String,
    breach_date: String,
    #[serde(default)]
    description: String,
}

impl From<HibpBreach> for BreachRecord {
    fn from(breach: HibpBreach) -> Self {
        BreachRecord::new(breach.name, breach.breach_date, strip_html(&breach.description))
    }
}

#[async_trait]
impl BreachLookup for HibpClient {
    async fn lookup_breaches(&self, account: &str) -> Result<BreachOutcome> {
        let Some(api_key) = &self.api_key else {
            tracing::warn!("HIBP API key is not set, breach lookup unavailable");
            return Ok(BreachOutcome::Unavailable);
        };

        let response = self
            .client
            .get(format!(
                "{}/breachedaccount/{}",
                self.base_url,
                urlencoding::encode(account)
            ))
            .query(&[("truncateResponse", "false")])
            .header("hibp-api-key", api_key.expose())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(BreachOutcome::Empty);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::ApiError {
                source_name: SOURCE_ID.to_string(),
                status: status.as_u16(),
                message: error_text,
            });
        }

        let breaches: Vec<HibpBreach> =
            response.json().await.map_err(|e| SourceError::ParseError {
                source_name: SOURCE_ID.to_string(),
                message: format!("Failed to parse response: {e}"),
            })?;

        Ok(BreachOutcome::from_records(
            breaches.into_iter().map(BreachRecord::from).collect(),
        ))
    }

    fn source_id(&self) -> &str {
        SOURCE_ID
    }
}
