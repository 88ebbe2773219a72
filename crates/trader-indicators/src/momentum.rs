//! Momentum indicators: RSI and MACD.

use serde::{Deserialize, Serialize};
use trader_core::{Indicator, MultiOutputIndicator};

use crate::moving_average::{Ema, Sma};

/// Relative strength index.
///
/// Average gain and average loss are plain rolling means over the
/// lookback window, not Wilder-smoothed. A window with no losses reads
/// as 100.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period + 1 {
            return Vec::new();
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);
        for window in data.windows(2) {
            let delta = window[1] - window[0];
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }

        let mean = Sma::new(self.period);
        let avg_gains = mean.calculate(&gains);
        let avg_losses = mean.calculate(&losses);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 {
                    100.0
                } else {
                    100.0 - 100.0 / (1.0 + gain / loss)
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// One MACD point: line, signal and histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Moving average convergence divergence.
///
/// Both component EMAs are seeded with the first input value, so the
/// line, signal and histogram are defined for every bar of the input.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0, "MACD periods must be greater than 0");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        Self { fast, slow, signal }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.is_empty() {
            return Vec::new();
        }

        let fast_ema = Ema::new(self.fast).calculate(data);
        let slow_ema = Ema::new(self.slow).calculate(data);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(fast, slow)| fast - slow)
            .collect();

        let signal_line = Ema::new(self.signal).calculate(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow + self.signal
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
