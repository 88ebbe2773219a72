//! Volatility indicators: rolling standard deviation, ATR and
//! Bollinger Bands.

use serde::{Deserialize, Serialize};
use trader_core::{Indicator, MultiOutputIndicator};

use crate::moving_average::Sma;

/// Rolling sample standard deviation (n - 1 denominator).
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "standard deviation period must be greater than 1");
        Self { period }
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return Vec::new();
        }

        data.windows(self.period)
            .map(|window| {
                let mean = window.iter().sum::<f64>() / self.period as f64;
                let variance = window
                    .iter()
                    .map(|value| (value - mean).powi(2))
                    .sum::<f64>()
                    / (self.period - 1) as f64;
                variance.sqrt()
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Average true range: a simple moving average of the true range.
///
/// The first bar has no previous close and contributes no true range,
/// so the output starts at bar index `period`.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "ATR period must be greater than 0");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn calculate_ohlc(&self, highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
        let n = highs.len();
        if n != lows.len() || n != closes.len() || n < self.period + 1 {
            return Vec::new();
        }

        let mut true_ranges = Vec::with_capacity(n - 1);
        for i in 1..n {
            let prev_close = closes[i - 1];
            let tr = (highs[i] - lows[i])
                .max((highs[i] - prev_close).abs())
                .max((lows[i] - prev_close).abs());
            true_ranges.push(tr);
        }

        Sma::new(self.period).calculate(&true_ranges)
    }
}

/// One Bollinger point: the band pair around the middle SMA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands over a rolling window.
///
/// Band width uses the sample standard deviation of the window.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_mult: f64,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_mult: f64) -> Self {
        assert!(period > 1, "Bollinger period must be greater than 1");
        assert!(std_dev_mult > 0.0, "Bollinger multiplier must be positive");
        Self { period, std_dev_mult }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        if data.len() < self.period {
            return Vec::new();
        }

        let middles = Sma::new(self.period).calculate(data);
        let deviations = StdDev::new(self.period).calculate(data);

        middles
            .iter()
            .zip(deviations.iter())
            .map(|(&middle, &dev)| {
                let width = self.std_dev_mult * dev;
                BollingerOutput {
                    upper: middle + width,
                    middle,
                    lower: middle - width,
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "BollingerBands"
    }
}
