//! Momentum: MACD line against its signal line.

use trader_core::{Side, Vote};
use trader_indicators::Snapshot;

/// Votes with the MACD crossover state. Equal lines cast no vote.
pub fn vote(snapshot: &Snapshot, weight: u32) -> Option<Vote> {
    if snapshot.macd > snapshot.macd_signal {
        Some(Vote::new(Side::Buy, weight, "MACD bullish"))
    } else if snapshot.macd < snapshot.macd_signal {
        Some(Vote::new(Side::Sell, weight, "MACD bearish"))
    } else {
        None
    }
}
