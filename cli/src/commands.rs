//! Argument definitions and command handlers.

use crate::output::render_report;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use insight_core::{AppConfig, SearchMode};
use insight_scanner::{CheckOrchestrator, CheckRequest};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Insight: identity risk reports assembled from breach disclosures, a
/// membership directory and public profile pages.
#[derive(Debug, Parser)]
#[command(name = "insight", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file.
    ///
    /// Defaults to the platform config directory; a missing default file
    /// falls back to built-in settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `insight_sources=trace`. Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build an identity risk report for an email, username or member ID.
    Check {
        /// Email, username or member ID.
        query: String,

        /// Company scope for the directory lookup.
        #[arg(long)]
        scope: Option<String>,

        /// Restrict sources: auto, directory, username-source or email-only.
        #[arg(long)]
        mode: Option<SearchMode>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (credentials redacted).
    Show,
    /// Print the default configuration file path.
    Path,
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// The `{ error, query, data }` envelope as JSON
    Json,
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load_with_env(path).with_context(|| match path {
        Some(path) => format!("failed to load config from {}", path.display()),
        None => "failed to load config".to_string(),
    })
}

/// `insight check`
pub async fn check(
    config_path: Option<&Path>,
    query: String,
    scope: Option<String>,
    mode: Option<SearchMode>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let orchestrator =
        CheckOrchestrator::from_config(&config).context("failed to initialize sources")?;

    let request = CheckRequest { query, scope, mode };
    let response = orchestrator.check(&request).await;

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&response).context("failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Text => match (&response.data, &response.error) {
            (Some(report), _) => print!("{}", render_report(report)),
            (None, Some(error)) => eprintln!("Error: {error}"),
            (None, None) => {}
        },
    }

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// `insight config ...`
pub fn config(config_path: Option<&Path>, action: &ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Path => {
            let path = AppConfig::config_path().context("failed to resolve config directory")?;
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let toml = toml::to_string_pretty(&config).context("failed to serialize config")?;
            print!("{toml}");
            println!();
            println!("# HIBP_API_KEY: {}", key_status(config.breach.api_key.is_some()));
            println!("# WHOP_API_KEY: {}", key_status(config.directory.api_key.is_some()));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn key_status(set: bool) -> &'static str {
    if set {
        "set"
    } else {
        "not set"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "insight",
            "--log-level",
            "warn",
            "check",
            "ada@example.com",
            "--scope",
            "biz_123",
            "--mode",
            "whop",
            "--format",
            "json",
        ])
        .expect("parse args");

        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        match cli.command {
            Command::Check {
                query,
                scope,
                mode,
                format,
            } => {
                assert_eq!(query, "ada@example.com");
                assert_eq!(scope.as_deref(), Some("biz_123"));
                assert_eq!(mode, Some(SearchMode::Directory));
                assert_eq!(format, OutputFormat::Json);
            }
            Command::Config { .. } => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["insight", "check", "ada", "--mode", "phone"]).is_err());
    }

    #[test]
    fn test_parse_config_with_global_flag() {
        let cli = Cli::try_parse_from(["insight", "config", "show", "--config", "/tmp/x.toml"])
            .expect("parse args");
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/x.toml")));
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Show
            }
        ));
    }
}
