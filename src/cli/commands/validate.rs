//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use trader_config::load_config;
use trader_risk::StopPolicy;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating built-in defaults and TRADER__* environment"),
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Symbols: {}", config.engine.symbols.join(", "));
    println!("Timeframe: {}", config.engine.timeframe);
    println!("Scan interval: {}s", config.engine.scan_interval_secs);
    println!("Dry run: {}", config.engine.dry_run);
    println!("Min confidence: {}", config.strategy.min_confidence);
    println!("Default risk: {}%", config.risk.default_risk_percent);
    println!("Max daily loss: {}", config.gate.max_daily_loss);
    println!(
        "Trading hours: {:02}:00-{:02}:59 UTC",
        config.gate.session_start_hour, config.gate.session_end_hour
    );
    match config.stops {
        StopPolicy::FixedPips { sl_pips, tp_pips } => {
            println!("Stops: fixed {}/{} pips", sl_pips, tp_pips);
        }
        StopPolicy::AtrMultiple {
            sl_multiplier,
            tp_multiplier,
        } => {
            println!("Stops: {}x/{}x ATR", sl_multiplier, tp_multiplier);
        }
    }

    Ok(())
}
