use clap::Parser;
use insight_cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    insight_cli::run(Cli::parse()).await
}
