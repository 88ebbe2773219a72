//! Trading bot CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, LogLevel};
use std::path::Path;
use trader_config::AppConfig;
use trader_monitor::{setup_logging, WorkerGuard};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let (config, _guard) = startup(cli.config.as_deref(), cli.log_level, cli.json_logs)?;
            cli::commands::run::run(args, config).await
        }
        Commands::Analyze(args) => {
            let (config, _guard) = startup(cli.config.as_deref(), cli.log_level, cli.json_logs)?;
            cli::commands::analyze::run(args, config).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref()).await,
    }
}

/// Load and validate the configuration, then initialize logging from it.
fn startup(
    config_path: Option<&Path>,
    log_level: Option<LogLevel>,
    json_logs: bool,
) -> Result<(AppConfig, Option<WorkerGuard>)> {
    let config =
        trader_config::load_config(config_path).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let level = match log_level {
        Some(LogLevel::Trace) => "trace",
        Some(LogLevel::Debug) => "debug",
        Some(LogLevel::Info) => "info",
        Some(LogLevel::Warn) => "warn",
        Some(LogLevel::Error) => "error",
        None => config.logging.level.as_str(),
    };
    let json = json_logs || config.logging.format == "json";
    let guard = setup_logging(level, json, config.logging.dir.as_deref().map(Path::new));

    Ok((config, guard))
}
