//! Insight command-line shell
//!
//! This is the thin shell that parses arguments, loads configuration and
//! prints reports. Core business logic lives in the `crates/` directory.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `insight check <QUERY>` | Build an identity risk report |
//! | `insight config show` | Print the effective configuration |
//! | `insight config path` | Print the default config file location |

mod commands;
mod output;

pub use commands::{Cli, Command, ConfigAction, OutputFormat};
pub use output::render_report;

use anyhow::Result;
use std::process::ExitCode;
use tracing::info;

/// Default filter when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "info,insight=debug";

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so JSON on stdout stays machine-readable.
pub fn init_tracing(level: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    init_tracing(cli.log_level.as_deref());

    info!("Starting Insight v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Check {
            query,
            scope,
            mode,
            format,
        } => commands::check(cli.config.as_deref(), query, scope, mode, format).await,
        Command::Config { action } => commands::config(cli.config.as_deref(), &action),
    }
}
