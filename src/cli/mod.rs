//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trader")]
#[command(author, version, about = "Adaptive multi-strategy trading engine")]
pub struct Cli {
    /// Configuration file path (defaults and TRADER__* environment apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scan loop against the built-in simulated market
    Run(RunArgs),
    /// Print one indicator snapshot and signal for a symbol
    Analyze(AnalyzeArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Symbols to scan (comma-separated, overrides the configured list)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Seconds between scan cycles (overrides the configured interval)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Log intended orders without placing them
    #[arg(long)]
    pub dry_run: bool,

    /// Starting balance of the simulated account
    #[arg(long, default_value = "10000")]
    pub balance: f64,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbol to analyze
    #[arg(short, long)]
    pub symbol: String,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}
