//! Initial stop placement for new positions.

use serde::{Deserialize, Serialize};
use trader_core::Side;

/// How stop-loss and take-profit prices are derived at entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum StopPolicy {
    /// Fixed distances in pips.
    FixedPips { sl_pips: f64, tp_pips: f64 },
    /// Distances scaled from the current ATR.
    AtrMultiple { sl_multiplier: f64, tp_multiplier: f64 },
}

impl Default for StopPolicy {
    fn default() -> Self {
        StopPolicy::FixedPips {
            sl_pips: 20.0,
            tp_pips: 30.0,
        }
    }
}

impl StopPolicy {
    /// Entry-to-stop distance in price units.
    ///
    /// Position sizing must use this value rather than recovering the
    /// distance from the entry and stop prices, where float cancellation
    /// can nudge a lot size across a volume-step boundary.
    pub fn stop_distance(&self, atr: f64, pip_size: f64) -> f64 {
        match self {
            StopPolicy::FixedPips { sl_pips, .. } => sl_pips * pip_size,
            StopPolicy::AtrMultiple { sl_multiplier, .. } => sl_multiplier * atr,
        }
    }

    /// Stop-loss and take-profit prices for an entry.
    ///
    /// `atr` is in price units and only read by the ATR variant;
    /// `pip_size` only by the fixed variant.
    pub fn stops(&self, side: Side, entry: f64, atr: f64, pip_size: f64) -> (f64, f64) {
        let sl_distance = self.stop_distance(atr, pip_size);
        let tp_distance = match self {
            StopPolicy::FixedPips { tp_pips, .. } => tp_pips * pip_size,
            StopPolicy::AtrMultiple { tp_multiplier, .. } => tp_multiplier * atr,
        };

        match side {
            Side::Buy => (entry - sl_distance, entry + tp_distance),
            Side::Sell => (entry + sl_distance, entry - tp_distance),
        }
    }
}
