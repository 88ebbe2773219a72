//! Run command: drive the scan loop over a simulated market.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;
use trader_config::AppConfig;
use trader_core::SymbolSpec;
use trader_engine::{EngineStatus, TradingEngine};
use trader_indicators::IndicatorEngine;
use trader_risk::{LifecycleManager, RiskGate};
use trader_signals::SignalAggregator;
use trader_terminal::{demo_limits, SimTerminal, SyntheticFeed};

use crate::cli::RunArgs;

pub async fn run(args: RunArgs, mut config: AppConfig) -> Result<()> {
    if !args.symbols.is_empty() {
        config.engine.symbols = args.symbols;
    }
    if let Some(interval) = args.interval {
        config.engine.scan_interval_secs = interval;
    }
    if args.dry_run {
        config.engine.dry_run = true;
    }
    // Re-check after the CLI overrides; an unknown -S symbol fails here.
    config.validate().context("invalid configuration")?;

    let balance = Decimal::try_from(args.balance).context("invalid balance")?;
    let specs: Vec<(String, SymbolSpec)> = config
        .engine
        .symbols
        .iter()
        .map(|symbol| {
            let spec = config.symbols.get(symbol).cloned().unwrap_or_default();
            (symbol.clone(), spec)
        })
        .collect();

    info!(%balance, symbols = specs.len(), "seeding simulated market");
    let mut sim = SimTerminal::new(balance);
    for (symbol, spec) in &specs {
        sim = sim.with_symbol(symbol.clone(), spec.clone(), demo_limits(spec));
    }
    let sim = Arc::new(sim);

    let mut feeds = Vec::with_capacity(specs.len());
    for (symbol, spec) in &specs {
        let mut feed = SyntheticFeed::new(symbol, spec);
        let history = feed.history(config.engine.candle_count, config.engine.timeframe.as_millis());
        sim.set_candles(symbol.clone(), history);
        let (bid, ask) = feed.quote();
        sim.set_quote(symbol.clone(), bid, ask);
        feeds.push((symbol.clone(), feed));
    }

    let interval = config.engine.scan_interval();
    let engine = Arc::new(
        TradingEngine::new(config.engine, sim.clone())
            .with_indicators(IndicatorEngine::new(config.indicators)?)
            .with_aggregator(SignalAggregator::new(config.strategy)?)
            .with_gate(RiskGate::new(config.gate))
            .with_risk_config(config.risk)
            .with_lifecycle(LifecycleManager::new(config.lifecycle))
            .with_stop_policy(config.stops)
            .with_news(Arc::new(config.news))
            .with_specs(config.symbols),
    );

    let feed_task = spawn_feed(Arc::clone(&sim), feeds, interval);
    let runner = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.run().await })
    };

    info!("press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");

    engine.stop();
    runner.await?;
    feed_task.abort();

    print_summary(&engine.status());
    Ok(())
}

/// Advances every symbol's walk by one candle per scan interval.
fn spawn_feed(
    sim: Arc<SimTerminal>,
    mut feeds: Vec<(String, SyntheticFeed)>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            for (symbol, feed) in &mut feeds {
                sim.push_candle(symbol.clone(), feed.next_candle());
                let (bid, ask) = feed.quote();
                sim.set_quote(symbol.clone(), bid, ask);
            }
        }
    })
}

fn print_summary(status: &EngineStatus) {
    let perf = &status.performance;
    println!();
    println!("Session summary");
    println!("  Trades:        {}", perf.total_trades);
    println!("  Wins / losses: {} / {}", perf.wins, perf.losses);
    println!("  Win rate:      {:.1}%", perf.win_rate);
    println!("  Net profit:    {:.2}", perf.total_profit);
    match perf.profit_factor {
        Some(factor) => println!("  Profit factor: {:.2}", factor),
        None => println!("  Profit factor: n/a"),
    }
    println!("  Still open:    {}", status.open_positions.len());
    println!("  Daily PnL:     {:.2}", status.risk.pnl_today);
}
