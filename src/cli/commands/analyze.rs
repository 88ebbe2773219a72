//! Analyze command: one-shot snapshot and signal for a symbol.

use anyhow::{bail, Result};
use trader_config::AppConfig;
use trader_core::{CandleSeries, Signal};
use trader_indicators::{IndicatorEngine, Snapshot};
use trader_signals::SignalAggregator;
use trader_terminal::SyntheticFeed;

use crate::cli::AnalyzeArgs;

pub async fn run(args: AnalyzeArgs, config: AppConfig) -> Result<()> {
    let Some(spec) = config.symbols.get(&args.symbol) else {
        bail!("no symbol metadata for {}", args.symbol);
    };

    let mut feed = SyntheticFeed::new(&args.symbol, spec);
    let mut series = CandleSeries::new(args.symbol.clone(), config.engine.timeframe);
    series.extend(feed.history(config.engine.candle_count, config.engine.timeframe.as_millis()));

    let indicators = IndicatorEngine::new(config.indicators)?;
    let aggregator = SignalAggregator::new(config.strategy)?;
    let snapshot = indicators.compute(&series)?;
    let signal = aggregator.evaluate(&snapshot);

    match args.output.as_str() {
        "json" => {
            let report = serde_json::json!({ "snapshot": snapshot, "signal": signal });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_report(&snapshot, &signal),
    }

    Ok(())
}

fn print_report(snapshot: &Snapshot, signal: &Signal) {
    println!("Snapshot for {}", snapshot.symbol);
    println!();
    println!("  Price:       {:.5}", snapshot.current_price);
    println!(
        "  Supertrend:  {} ({:.5})",
        snapshot.trend_direction, snapshot.trend_value
    );
    println!("  ATR:         {:.5}", snapshot.atr);
    println!("  RSI:         {:.1}", snapshot.rsi);
    println!(
        "  EMAs:        {:.5} / {:.5} / {:.5}",
        snapshot.ema_fast, snapshot.ema_slow, snapshot.ema_trend
    );
    println!(
        "  MACD:        {:.6} (signal {:.6})",
        snapshot.macd, snapshot.macd_signal
    );
    println!(
        "  Bollinger:   {:.5} .. {:.5}",
        snapshot.bb_lower, snapshot.bb_upper
    );
    println!(
        "  Volume:      {:.0} (avg {:.0})",
        snapshot.current_volume, snapshot.volume_ma
    );
    println!(
        "  Session:     {:.5} .. {:.5}",
        snapshot.session_low, snapshot.session_high
    );
    println!();
    match signal.direction {
        Some(side) => println!(
            "Signal: {} at confidence {} ({})",
            side, signal.confidence, signal.reason
        ),
        None => println!("Signal: none"),
    }
}
