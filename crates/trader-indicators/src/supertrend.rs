//! SuperTrend: an ATR band pair folded into a single trend line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::volatility::Atr;

/// Which side of the price the trend line currently sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub fn is_up(&self) -> bool {
        matches!(self, TrendDirection::Up)
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "UP"),
            TrendDirection::Down => write!(f, "DOWN"),
        }
    }
}

/// One SuperTrend point: the active band and the trend it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuperTrendPoint {
    pub value: f64,
    pub direction: TrendDirection,
}

/// SuperTrend over OHLC data.
///
/// Bands are the bar midpoint shifted by `multiplier * ATR`. The fold
/// runs strictly left to right: the direction starts up at the first
/// ATR-defined bar and flips only when the close crosses the previous
/// bar's band. While up the line is the lower band, while down the
/// upper band.
#[derive(Debug, Clone)]
pub struct SuperTrend {
    atr_period: usize,
    multiplier: f64,
}

impl SuperTrend {
    pub fn new(atr_period: usize, multiplier: f64) -> Self {
        assert!(atr_period > 0, "SuperTrend ATR period must be greater than 0");
        assert!(multiplier > 0.0, "SuperTrend multiplier must be positive");
        Self {
            atr_period,
            multiplier,
        }
    }

    pub fn period(&self) -> usize {
        self.atr_period + 1
    }

    pub fn calculate_ohlc(
        &self,
        highs: &[f64],
        lows: &[f64],
        closes: &[f64],
    ) -> Vec<SuperTrendPoint> {
        let atr = Atr::new(self.atr_period).calculate_ohlc(highs, lows, closes);
        if atr.is_empty() {
            return Vec::new();
        }

        let offset = highs.len() - atr.len();
        let mut result = Vec::with_capacity(atr.len());
        let mut direction = TrendDirection::Up;
        let mut prev_upper = 0.0;
        let mut prev_lower = 0.0;

        for (j, &atr_value) in atr.iter().enumerate() {
            let i = offset + j;
            let midpoint = (highs[i] + lows[i]) / 2.0;
            let upper = midpoint + self.multiplier * atr_value;
            let lower = midpoint - self.multiplier * atr_value;

            // The flip test looks at the previous bar's bands, not the
            // freshly shifted ones.
            if j > 0 {
                if closes[i] > prev_upper {
                    direction = TrendDirection::Up;
                } else if closes[i] < prev_lower {
                    direction = TrendDirection::Down;
                }
            }

            let value = match direction {
                TrendDirection::Up => lower,
                TrendDirection::Down => upper,
            };
            result.push(SuperTrendPoint { value, direction });

            prev_upper = upper;
            prev_lower = lower;
        }

        result
    }
}

impl Default for SuperTrend {
    fn default() -> Self {
        Self::new(10, 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_up_and_tracks_lower_band() {
        let st = SuperTrend::new(2, 1.0);
        let highs = [11.0, 11.0, 11.0, 11.0];
        let lows = [9.0, 9.0, 9.0, 9.0];
        let closes = [10.0, 10.0, 10.0, 10.0];
        let result = st.calculate_ohlc(&highs, &lows, &closes);

        // ATR is 2 throughout, so lower band = 10 - 2 = 8.
        assert_eq!(result.len(), 2);
        for point in &result {
            assert_eq!(point.direction, TrendDirection::Up);
            assert!((point.value - 8.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_flips_down_when_close_breaks_previous_lower_band() {
        let st = SuperTrend::new(2, 1.0);
        let highs = [11.0, 11.0, 11.0, 11.0, 7.0];
        let lows = [9.0, 9.0, 9.0, 9.0, 3.0];
        let closes = [10.0, 10.0, 10.0, 10.0, 4.0];
        let result = st.calculate_ohlc(&highs, &lows, &closes);

        assert_eq!(result.len(), 3);
        assert_eq!(result[1].direction, TrendDirection::Up);

        // Close 4 is below the previous lower band of 8; the line jumps
        // to the new upper band 5 + 4.5 = 9.5.
        let last = result.last().unwrap();
        assert_eq!(last.direction, TrendDirection::Down);
        assert!((last.value - 9.5).abs() < 1e-10);
    }

    #[test]
    fn test_flips_back_up_when_close_breaks_previous_upper_band() {
        let st = SuperTrend::new(2, 1.0);
        let highs = [11.0, 11.0, 11.0, 11.0, 7.0, 14.0];
        let lows = [9.0, 9.0, 9.0, 9.0, 3.0, 12.0];
        let closes = [10.0, 10.0, 10.0, 10.0, 4.0, 13.0];
        let result = st.calculate_ohlc(&highs, &lows, &closes);

        // Close 13 is above the previous upper band of 9.5.
        let last = result.last().unwrap();
        assert_eq!(last.direction, TrendDirection::Up);
        assert!((last.value - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_short_input_yields_nothing() {
        let st = SuperTrend::default();
        let flat = vec![1.0; 10];
        assert!(st.calculate_ohlc(&flat, &flat, &flat).is_empty());
    }
}
