//! OHLCV candle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::Timeframe;

/// A single OHLCV candle. Uses f64 for fast indicator math.
///
/// Candles are immutable once observed; a series is ordered by strictly
/// increasing timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp in milliseconds (candle open time)
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Tick volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Midpoint of the bar's range, (high + low) / 2.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// True range against the previous close (used for ATR).
    ///
    /// Without a previous close this degenerates to high - low.
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }

    /// Get the open time as a DateTime. Out-of-range timestamps clamp to
    /// the epoch.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }
}

/// Rolling window of candles for one symbol, oldest first.
///
/// When a capacity is set, pushing past it evicts from the front, so the
/// series behaves as the bounded window the indicator engine consumes.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Timeframe of the candles
    pub timeframe: Timeframe,
    candles: VecDeque<Candle>,
    /// Maximum capacity (0 = unlimited)
    capacity: usize,
}

impl CandleSeries {
    /// Create a new empty series.
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            candles: VecDeque::new(),
            capacity: 0,
        }
    }

    /// Create a series with a maximum capacity. Oldest candles are evicted
    /// once the capacity is reached.
    pub fn with_capacity(symbol: impl Into<String>, timeframe: Timeframe, capacity: usize) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            candles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new candle, evicting the oldest if at capacity.
    pub fn push(&mut self, candle: Candle) {
        if self.capacity > 0 && self.candles.len() >= self.capacity {
            self.candles.pop_front();
        }
        self.candles.push_back(candle);
    }

    /// Push multiple candles.
    pub fn extend(&mut self, candles: impl IntoIterator<Item = Candle>) {
        for candle in candles {
            self.push(candle);
        }
    }

    /// Number of candles in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get the last (most recent) candle.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.back()
    }

    /// Get a candle by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }

    /// Highest high over the whole window.
    pub fn session_high(&self) -> Option<f64> {
        self.candles.iter().map(|c| c.high).reduce(f64::max)
    }

    /// Lowest low over the whole window.
    pub fn session_low(&self) -> Option<f64> {
        self.candles.iter().map(|c| c.low).reduce(f64::min)
    }

    /// Get an iterator over the candles.
    pub fn iter(&self) -> impl Iterator<Item = &Candle> {
        self.candles.iter()
    }

    /// Clear all candles.
    pub fn clear(&mut self) {
        self.candles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_range() {
        let candle = Candle::new(1000, 1.1000, 1.1050, 1.0980, 1.1020, 500.0);

        // Without previous close: plain range
        assert!((candle.true_range(None) - 0.0070).abs() < 1e-9);

        // Gap below the previous close widens the range
        assert!((candle.true_range(Some(1.1100)) - 0.0120).abs() < 1e-9);
    }

    #[test]
    fn test_series_capacity_eviction() {
        let mut series = CandleSeries::with_capacity("EURUSD", Timeframe::Minute5, 3);

        series.push(Candle::new(1, 1.0, 1.1, 0.9, 1.05, 100.0));
        series.push(Candle::new(2, 1.05, 1.15, 1.0, 1.1, 100.0));
        series.push(Candle::new(3, 1.1, 1.2, 1.05, 1.15, 100.0));
        assert_eq!(series.len(), 3);

        series.push(Candle::new(4, 1.15, 1.25, 1.1, 1.2, 100.0));
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(0).unwrap().timestamp, 2);
    }

    #[test]
    fn test_session_extremes() {
        let mut series = CandleSeries::new("EURUSD", Timeframe::Minute5);
        series.push(Candle::new(1, 1.0, 1.12, 0.95, 1.05, 100.0));
        series.push(Candle::new(2, 1.05, 1.08, 0.99, 1.02, 100.0));

        assert_eq!(series.session_high(), Some(1.12));
        assert_eq!(series.session_low(), Some(0.95));
    }

    #[test]
    fn test_series_extractions() {
        let mut series = CandleSeries::new("EURUSD", Timeframe::Minute5);
        series.push(Candle::new(1, 1.0, 1.1, 0.9, 1.05, 1000.0));
        series.push(Candle::new(2, 1.05, 1.15, 1.0, 1.1, 2000.0));

        assert_eq!(series.closes(), vec![1.05, 1.1]);
        assert_eq!(series.volumes(), vec![1000.0, 2000.0]);
    }
}
