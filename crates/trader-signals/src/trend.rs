//! Trend following: fast EMA against slow EMA.

use trader_core::{Side, Vote};
use trader_indicators::Snapshot;

/// Votes with the EMA ordering. Equal EMAs cast no vote.
pub fn vote(snapshot: &Snapshot, weight: u32) -> Option<Vote> {
    if snapshot.ema_fast > snapshot.ema_slow {
        Some(Vote::new(Side::Buy, weight, "Trend UP"))
    } else if snapshot.ema_fast < snapshot.ema_slow {
        Some(Vote::new(Side::Sell, weight, "Trend DOWN"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::neutral_snapshot;

    #[test]
    fn test_trend_follows_ema_ordering() {
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1010;
        snapshot.ema_slow = 1.1000;

        let vote = vote(&snapshot, 25).unwrap();
        assert_eq!(vote.direction, Side::Buy);
        assert_eq!(vote.weight, 25);
        assert_eq!(vote.reason, "Trend UP");
    }

    #[test]
    fn test_trend_abstains_when_emas_equal() {
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1000;
        snapshot.ema_slow = 1.1000;

        assert!(vote(&snapshot, 25).is_none());
    }
}
