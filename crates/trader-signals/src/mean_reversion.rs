//! Mean reversion: RSI extremes and Bollinger Band touches.
//!
//! The two checks vote independently, so a stretched market can put the
//! full double weight behind one side.

use trader_core::{Side, Vote};
use trader_indicators::Snapshot;

pub fn votes(snapshot: &Snapshot, weight: u32, rsi_oversold: f64, rsi_overbought: f64) -> Vec<Vote> {
    let mut votes = Vec::new();

    if snapshot.rsi < rsi_oversold {
        votes.push(Vote::new(
            Side::Buy,
            weight,
            format!("RSI oversold {:.0}", snapshot.rsi),
        ));
    } else if snapshot.rsi > rsi_overbought {
        votes.push(Vote::new(
            Side::Sell,
            weight,
            format!("RSI overbought {:.0}", snapshot.rsi),
        ));
    }

    if snapshot.current_price <= snapshot.bb_lower {
        votes.push(Vote::new(Side::Buy, weight, "BB bounce"));
    } else if snapshot.current_price >= snapshot.bb_upper {
        votes.push(Vote::new(Side::Sell, weight, "BB reversal"));
    }

    votes
}
