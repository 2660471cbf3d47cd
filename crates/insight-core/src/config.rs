//! Configuration management for Insight.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Credentials are never read from or
//! written to the TOML file; they only come from the environment.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use zeroize::Zeroizing;

/// Main application configuration.
///
/// This is loaded from `~/.config/insight/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Breach-disclosure lookup settings
    pub breach: BreachConfig,
    /// Membership directory settings
    pub directory: DirectoryConfig,
    /// Profile scraping settings
    pub scrape: ScrapeConfig,
    /// Report assembly settings
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `HIBP_API_KEY`: breach lookup credential
    /// - `WHOP_API_KEY`: directory lookup credential
    /// - `INSIGHT_HIBP_URL`: breach API base URL
    /// - `INSIGHT_WHOP_URL`: directory API base URL
    /// - `INSIGHT_GITHUB_URL`: profile scrape base URL
    /// - `INSIGHT_FALLBACK_POLICY`: `synthetic` or `strict`
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("HIBP_API_KEY") {
            self.breach.api_key = Some(ApiKey::new(key));
            tracing::debug!("Breach API key loaded from env");
        }

        if let Some(key) = get("WHOP_API_KEY") {
            self.directory.api_key = Some(ApiKey::new(key));
            tracing::debug!("Directory API key loaded from env");
        }

        if let Some(url) = get("INSIGHT_HIBP_URL") {
            tracing::debug!("Override breach.base_url from env: {}", url);
            self.breach.base_url = url;
        }

        if let Some(url) = get("INSIGHT_WHOP_URL") {
            tracing::debug!("Override directory.base_url from env: {}", url);
            self.directory.base_url = url;
        }

        if let Some(url) = get("INSIGHT_GITHUB_URL") {
            tracing::debug!("Override scrape.base_url from env: {}", url);
            self.scrape.base_url = url;
        }

        if let Some(policy) = get("INSIGHT_FALLBACK_POLICY") {
            self.report.fallback_policy = policy.parse()?;
            tracing::debug!(
                "Override report.fallback_policy from env: {:?}",
                self.report.fallback_policy
            );
        }

        Ok(())
    }

    /// Check values that serde cannot constrain.
    pub fn validate(&self) -> ConfigResult<()> {
        let timeouts = [
            ("breach.timeout_secs", self.breach.timeout_secs),
            ("directory.timeout_secs", self.directory.timeout_secs),
            ("scrape.timeout_secs", self.scrape.timeout_secs),
            ("scrape.website_timeout_secs", self.scrape.website_timeout_secs),
        ];
        for (field, secs) in timeouts {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        let urls = [
            ("breach.base_url", &self.breach.base_url),
            ("directory.base_url", &self.directory.base_url),
            ("scrape.base_url", &self.scrape.base_url),
        ];
        for (field, url) in urls {
            if url::Url::parse(url).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{url}' is not a valid URL"),
                });
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/insight/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "insight", "insight").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// An API credential held in zeroizing memory.
///
/// `Debug` output is redacted.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Wrap a raw credential.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Borrow the raw credential for use in a request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Breach-disclosure lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreachConfig {
    /// API credential (environment only)
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
    /// API base URL
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BreachConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://haveibeenpwned.com/api/v3".to_string(),
            user_agent: "Insight-Identity-Check".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Membership directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// API credential (environment only)
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectoryConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.whop.com/api/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Profile scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Profile site base URL
    pub base_url: String,
    /// Timeout for the whole profile scrape in seconds
    pub timeout_secs: u64,
    /// Timeout for the linked personal website fetch in seconds
    pub website_timeout_secs: u64,
    /// Whether to follow a linked personal website for more accounts
    pub follow_websites: bool,
}

impl ScrapeConfig {
    /// Whole-scrape timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Website deep-scrape timeout as a `Duration`.
    #[must_use]
    pub fn website_timeout(&self) -> Duration {
        Duration::from_secs(self.website_timeout_secs)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://github.com".to_string(),
            timeout_secs: 25,
            website_timeout_secs: 10,
            follow_websites: true,
        }
    }
}

/// What to do when no source produced real evidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Produce a report from deterministic placeholder data.
    #[default]
    Synthetic,
    /// Fail the request with a "no results" message.
    Strict,
}

impl FromStr for FallbackPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::InvalidValue {
                field: "report.fallback_policy".to_string(),
                reason: format!("expected 'synthetic' or 'strict', got '{other}'"),
            }),
        }
    }
}

/// Report assembly settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// No-evidence behaviour
    pub fallback_policy: FallbackPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.breach.api_key.is_none());
        assert!(config.directory.api_key.is_none());
        assert_eq!(config.breach.timeout_secs, 15);
        assert_eq!(config.scrape.website_timeout_secs, 10);
        assert!(config.scrape.follow_websites);
        assert_eq!(config.report.fallback_policy, FallbackPolicy::Synthetic);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_config_serialization_omits_credentials() {
        let mut config = AppConfig::default();
        config.breach.api_key = Some(ApiKey::new("super-secret"));

        let toml_str = toml::to_string_pretty(&config).expect("serialize config");
        assert!(toml_str.contains("[breach]"));
        assert!(toml_str.contains("[scrape]"));
        assert!(!toml_str.contains("super-secret"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert!(parsed.breach.api_key.is_none());
        assert_eq!(parsed.breach.base_url, config.breach.base_url);
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn test_config_written_then_loaded() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.scrape.follow_websites = false;
        config.report.fallback_policy = FallbackPolicy::Strict;
        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert!(!loaded.scrape.follow_websites);
        assert_eq!(loaded.report.fallback_policy, FallbackPolicy::Strict);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let err = AppConfig::load_from(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[directory]\ntimeout_secs = 0\n").expect("write config");

        let err = AppConfig::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("directory.timeout_secs"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HIBP_API_KEY", "hibp-key"),
            ("WHOP_API_KEY", ""),
            ("INSIGHT_GITHUB_URL", "http://127.0.0.1:9000"),
            ("INSIGHT_FALLBACK_POLICY", "strict"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| (*v).to_string()))
            .expect("apply overrides");

        assert_eq!(
            config.breach.api_key.as_ref().map(ApiKey::expose),
            Some("hibp-key")
        );
        assert!(config.directory.api_key.is_none(), "empty values are ignored");
        assert_eq!(config.scrape.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.report.fallback_policy, FallbackPolicy::Strict);
    }

    #[test]
    fn test_env_override_bad_policy() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "INSIGHT_FALLBACK_POLICY").then(|| "sometimes".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[breach]
timeout_secs = 5

[report]
fallback_policy = "strict"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.breach.timeout_secs, 5);
        assert_eq!(config.report.fallback_policy, FallbackPolicy::Strict);
        // These should be defaults
        assert_eq!(config.directory.timeout_secs, 10);
        assert_eq!(config.scrape.base_url, "https://github.com");
    }
}
