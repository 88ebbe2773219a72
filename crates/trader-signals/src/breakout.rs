//! Breakout fade: price pressing a session extreme votes AGAINST the
//! break, treating the extreme as exhaustion rather than continuation.

use trader_core::{Side, Vote};
use trader_indicators::Snapshot;

/// Votes when price is within `proximity` (fractional) of a session
/// extreme. Near the high fades short, near the low fades long.
pub fn vote(snapshot: &Snapshot, weight: u32, proximity: f64) -> Option<Vote> {
    if snapshot.current_price >= snapshot.session_high * (1.0 - proximity) {
        Some(Vote::new(Side::Sell, weight, "Breakout UP"))
    } else if snapshot.current_price <= snapshot.session_low * (1.0 + proximity) {
        Some(Vote::new(Side::Buy, weight, "Breakout DOWN"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::neutral_snapshot;

    #[test]
    fn test_press_on_session_high_fades_short() {
        let mut snapshot = neutral_snapshot();
        snapshot.session_high = 1.1200;
        snapshot.current_price = 1.1190; // within 0.2%

        let vote = vote(&snapshot, 25, 0.002).unwrap();
        assert_eq!(vote.direction, Side::Sell);
        assert_eq!(vote.reason, "Breakout UP");
    }

    #[test]
    fn test_press_on_session_low_fades_long() {
        let mut snapshot = neutral_snapshot();
        snapshot.session_low = 1.0800;
        snapshot.current_price = 1.0810;

        let vote = vote(&snapshot, 25, 0.002).unwrap();
        assert_eq!(vote.direction, Side::Buy);
        assert_eq!(vote.reason, "Breakout DOWN");
    }

    #[test]
    fn test_mid_range_casts_no_vote() {
        let snapshot = neutral_snapshot();
        assert!(vote(&snapshot, 25, 0.002).is_none());
    }
}
