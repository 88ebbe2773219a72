//! Trading signal types.

use serde::{Deserialize, Serialize};

use super::Side;

/// A single strategy's weighted vote for one direction.
///
/// Votes are ephemeral: produced and consumed within one aggregation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub direction: Side,
    pub weight: u32,
    pub reason: String,
}

impl Vote {
    pub fn new(direction: Side, weight: u32, reason: impl Into<String>) -> Self {
        Self {
            direction,
            weight,
            reason: reason.into(),
        }
    }
}

/// Aggregated directional signal with a 0-100 confidence score.
///
/// `direction` is None when the vote total misses the confidence floor or
/// when both sides tie; confidence is 0 in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub direction: Option<Side>,
    pub confidence: u8,
    pub reason: String,
}

impl Signal {
    /// The no-trade signal.
    pub fn none() -> Self {
        Self {
            direction: None,
            confidence: 0,
            reason: "No clear signal".to_string(),
        }
    }

    /// A directional signal with the given confidence.
    pub fn directional(direction: Side, confidence: u8, reason: impl Into<String>) -> Self {
        Self {
            direction: Some(direction),
            confidence,
            reason: reason.into(),
        }
    }

    /// True when the signal carries a direction.
    pub fn is_actionable(&self) -> bool {
        self.direction.is_some()
    }
}
