//! Deterministic synthetic market for demos and dry runs.
//!
//! The walk mixes two sine waves with different periods, so the series
//! trends in both directions without drifting away from its base price.
//! Every value is a pure function of the step counter and the symbol
//! name, so a symbol replays the same tape on every run.

use chrono::Utc;
use rust_decimal::Decimal;
use trader_core::{Candle, SymbolLimits, SymbolSpec};

/// Half of the quoted spread, in pips.
const HALF_SPREAD_PIPS: f64 = 0.6;

/// Scripted price walk for one symbol.
#[derive(Debug, Clone)]
pub struct SyntheticFeed {
    base: f64,
    pip: f64,
    phase: f64,
    step: usize,
}

impl SyntheticFeed {
    pub fn new(symbol: &str, spec: &SymbolSpec) -> Self {
        // Phase-shift each symbol so the scanned pairs do not move in
        // lockstep.
        let phase = symbol.bytes().map(f64::from).sum::<f64>() % 97.0;
        Self {
            base: base_price(spec.pip_size),
            pip: spec.pip_size,
            phase,
            step: 0,
        }
    }

    fn close_at(&self, step: usize) -> f64 {
        let t = step as f64 + self.phase;
        self.base + ((t * 0.11).sin() * 12.0 + (t * 0.043).sin() * 25.0) * self.pip
    }

    fn candle_at(&self, step: usize, timestamp: i64) -> Candle {
        let open = self.close_at(step);
        let close = self.close_at(step + 1);
        let high = open.max(close) + 0.8 * self.pip;
        let low = open.min(close) - 0.8 * self.pip;
        let volume = 1000.0 + (step as f64 * 0.7).sin().abs() * 400.0;
        Candle::new(timestamp, open, high, low, close, volume)
    }

    /// Warmup history of `count` candles ending now. Advances the feed
    /// past them so later candles continue the walk.
    pub fn history(&mut self, count: usize, candle_ms: u64) -> Vec<Candle> {
        let now = Utc::now().timestamp_millis();
        let candles = (0..count)
            .map(|i| {
                let age = (count - i) as i64 * candle_ms as i64;
                self.candle_at(self.step + i, now - age)
            })
            .collect();
        self.step += count;
        candles
    }

    /// The next candle in the walk, stamped with the current time.
    pub fn next_candle(&mut self) -> Candle {
        let candle = self.candle_at(self.step, Utc::now().timestamp_millis());
        self.step += 1;
        candle
    }

    /// Bid and ask straddling the latest close.
    pub fn quote(&self) -> (f64, f64) {
        let mid = self.close_at(self.step);
        let half = HALF_SPREAD_PIPS * self.pip;
        (mid - half, mid + half)
    }
}

/// Volume limits of a typical demo account.
pub fn demo_limits(spec: &SymbolSpec) -> SymbolLimits {
    SymbolLimits {
        volume_min: Decimal::new(1, 2),
        volume_max: Decimal::from(100),
        volume_step: Decimal::new(1, 2),
        point: spec.pip_size / 10.0,
    }
}

fn base_price(pip_size: f64) -> f64 {
    if pip_size < 0.001 {
        1.1000
    } else if pip_size < 0.1 {
        155.00
    } else {
        2_400.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn major() -> SymbolSpec {
        SymbolSpec::new(0.0001, 100_000.0)
    }

    #[test]
    fn test_walk_is_deterministic_per_symbol() {
        let spec = major();
        let a = SyntheticFeed::new("EURUSD", &spec);
        let b = SyntheticFeed::new("EURUSD", &spec);
        for step in 0..30 {
            assert_eq!(a.close_at(step), b.close_at(step));
        }
        let other = SyntheticFeed::new("GBPUSD", &spec);
        assert_ne!(a.close_at(0), other.close_at(0));
    }

    #[test]
    fn test_history_and_next_candle_are_continuous() {
        let mut feed = SyntheticFeed::new("EURUSD", &major());
        let history = feed.history(10, 300_000);
        assert_eq!(history.len(), 10);
        for pair in history.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
            assert_eq!(pair[0].close, pair[1].open);
        }
        let next = feed.next_candle();
        assert_eq!(history.last().unwrap().close, next.open);
    }

    #[test]
    fn test_candles_keep_high_low_ordering() {
        let mut feed = SyntheticFeed::new("XAUUSD", &SymbolSpec::new(0.1, 100.0));
        for candle in feed.history(50, 300_000) {
            assert!(candle.high >= candle.open.max(candle.close));
            assert!(candle.low <= candle.open.min(candle.close));
        }
    }

    #[test]
    fn test_quote_straddles_the_latest_close() {
        let mut feed = SyntheticFeed::new("EURUSD", &major());
        let history = feed.history(20, 300_000);
        let last_close = history.last().unwrap().close;
        let (bid, ask) = feed.quote();
        assert!(bid < last_close && last_close < ask);
        assert!((ask - bid - 0.00012).abs() < 1e-9);
    }

    #[test]
    fn test_base_price_tracks_the_instrument() {
        let fx = SyntheticFeed::new("EURUSD", &major());
        let jpy = SyntheticFeed::new("USDJPY", &SymbolSpec::new(0.01, 100_000.0));
        let gold = SyntheticFeed::new("XAUUSD", &SymbolSpec::new(0.1, 100.0));
        assert!((fx.close_at(0) - 1.1).abs() < 0.01);
        assert!((jpy.close_at(0) - 155.0).abs() < 1.0);
        assert!((gold.close_at(0) - 2_400.0).abs() < 40.0);
    }

    #[test]
    fn test_demo_limits_scale_the_point_size() {
        let limits = demo_limits(&major());
        assert_eq!(limits.volume_min, Decimal::new(1, 2));
        assert!((limits.point - 0.00001).abs() < 1e-12);
    }
}
