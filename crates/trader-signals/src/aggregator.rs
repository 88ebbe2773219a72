//! Vote tallying across the strategy set.

use serde::{Deserialize, Serialize};
use trader_core::{Side, Signal, TradingError, Vote};
use trader_indicators::Snapshot;

use crate::{breakout, mean_reversion, momentum, trend};

/// Enable flag and vote weight for one strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyToggle {
    pub enabled: bool,
    pub weight: u32,
}

impl Default for StrategyToggle {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 25,
        }
    }
}

/// Aggregation thresholds and per-strategy weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub trend: StrategyToggle,
    pub mean_reversion: StrategyToggle,
    pub momentum: StrategyToggle,
    pub breakout: StrategyToggle,
    /// Combined vote weight both sides must reach before any signal fires.
    pub min_confidence: u32,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Fractional distance from a session extreme that counts as a press.
    pub breakout_proximity: f64,
    /// Require current volume above `volume_ma * volume_multiplier`.
    pub volume_confirmation: bool,
    pub volume_multiplier: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            trend: StrategyToggle::default(),
            mean_reversion: StrategyToggle::default(),
            momentum: StrategyToggle::default(),
            breakout: StrategyToggle::default(),
            min_confidence: 50,
            rsi_oversold: 35.0,
            rsi_overbought: 65.0,
            breakout_proximity: 0.002,
            volume_confirmation: false,
            volume_multiplier: 1.5,
        }
    }
}

impl AggregatorConfig {
    pub fn validate(&self) -> Result<(), TradingError> {
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(TradingError::Validation(
                "RSI oversold threshold must be below the overbought threshold".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
        {
            return Err(TradingError::Validation(
                "RSI thresholds must lie within 0-100".to_string(),
            ));
        }
        if self.breakout_proximity <= 0.0 {
            return Err(TradingError::Validation(
                "breakout proximity must be positive".to_string(),
            ));
        }
        if self.volume_multiplier <= 0.0 {
            return Err(TradingError::Validation(
                "volume multiplier must be positive".to_string(),
            ));
        }
        let any_active = [
            &self.trend,
            &self.mean_reversion,
            &self.momentum,
            &self.breakout,
        ]
        .iter()
        .any(|toggle| toggle.enabled && toggle.weight > 0);
        if !any_active {
            return Err(TradingError::Validation(
                "at least one strategy must be enabled with a positive weight".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tallies strategy votes over a snapshot into one signal.
///
/// Both sides' weights must together reach `min_confidence`, and the
/// winner needs a strict majority; a tie yields no signal. Confidence is
/// the winning side's weight sum, capped at 100.
#[derive(Debug, Clone)]
pub struct SignalAggregator {
    config: AggregatorConfig,
}

impl SignalAggregator {
    pub fn new(config: AggregatorConfig) -> Result<Self, TradingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn evaluate(&self, snapshot: &Snapshot) -> Signal {
        if self.config.volume_confirmation
            && snapshot.current_volume <= snapshot.volume_ma * self.config.volume_multiplier
        {
            return Signal {
                reason: "Volume below confirmation threshold".to_string(),
                ..Signal::none()
            };
        }

        let mut votes: Vec<Vote> = Vec::new();
        if self.config.trend.enabled {
            votes.extend(trend::vote(snapshot, self.config.trend.weight));
        }
        if self.config.mean_reversion.enabled {
            votes.extend(mean_reversion::votes(
                snapshot,
                self.config.mean_reversion.weight,
                self.config.rsi_oversold,
                self.config.rsi_overbought,
            ));
        }
        if self.config.momentum.enabled {
            votes.extend(momentum::vote(snapshot, self.config.momentum.weight));
        }
        if self.config.breakout.enabled {
            votes.extend(breakout::vote(
                snapshot,
                self.config.breakout.weight,
                self.config.breakout_proximity,
            ));
        }

        self.tally(&votes)
    }

    fn tally(&self, votes: &[Vote]) -> Signal {
        let side_sum = |side: Side| -> u32 {
            votes
                .iter()
                .filter(|v| v.direction == side)
                .map(|v| v.weight)
                .sum()
        };
        let buy_votes = side_sum(Side::Buy);
        let sell_votes = side_sum(Side::Sell);

        if buy_votes + sell_votes < self.config.min_confidence || buy_votes == sell_votes {
            return Signal::none();
        }

        let winner = if buy_votes > sell_votes {
            Side::Buy
        } else {
            Side::Sell
        };
        let confidence = buy_votes.max(sell_votes).min(100) as u8;
        let reason = votes
            .iter()
            .filter(|v| v.direction == winner)
            .take(2)
            .map(|v| v.reason.as_str())
            .collect::<Vec<_>>()
            .join(" | ");

        Signal::directional(winner, confidence, reason)
    }
}

impl Default for SignalAggregator {
    fn default() -> Self {
        Self {
            config: AggregatorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::neutral_snapshot;

    #[test]
    fn test_neutral_snapshot_yields_no_signal() {
        let aggregator = SignalAggregator::default();
        let signal = aggregator.evaluate(&neutral_snapshot());

        assert!(!signal.is_actionable());
        assert_eq!(signal.confidence, 0);
        assert_eq!(signal.reason, "No clear signal");
    }

    #[test]
    fn test_aligned_strategies_stack_confidence() {
        let aggregator = SignalAggregator::default();
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1010; // trend buy
        snapshot.rsi = 30.0; // RSI buy
        snapshot.current_price = snapshot.bb_lower; // BB buy

        let signal = aggregator.evaluate(&snapshot);
        assert_eq!(signal.direction, Some(Side::Buy));
        assert_eq!(signal.confidence, 75);
        assert_eq!(signal.reason, "Trend UP | RSI oversold 30");
    }

    #[test]
    fn test_single_vote_misses_confidence_floor() {
        let aggregator = SignalAggregator::default();
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1010;

        let signal = aggregator.evaluate(&snapshot);
        assert!(!signal.is_actionable());
    }

    #[test]
    fn test_split_vote_is_a_tie() {
        let aggregator = SignalAggregator::default();
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1010; // trend buy, 25
        snapshot.macd = -0.0002;
        snapshot.macd_signal = 0.0001; // momentum sell, 25

        // Total reaches 50 but neither side leads.
        let signal = aggregator.evaluate(&snapshot);
        assert!(!signal.is_actionable());
    }

    #[test]
    fn test_session_high_press_fades_a_rally() {
        let aggregator = SignalAggregator::default();
        let mut snapshot = neutral_snapshot();
        snapshot.current_price = snapshot.session_high; // breakout sell
        snapshot.rsi = 70.0; // RSI sell
        snapshot.macd = -0.0001; // momentum sell

        // Price at the session high also sits above the upper band, so
        // all four sell checks fire.
        let signal = aggregator.evaluate(&snapshot);
        assert_eq!(signal.direction, Some(Side::Sell));
        assert_eq!(signal.confidence, 100);
        assert_eq!(signal.reason, "RSI overbought 70 | BB reversal");
    }

    #[test]
    fn test_confidence_caps_at_100() {
        let config = AggregatorConfig {
            trend: StrategyToggle {
                enabled: true,
                weight: 80,
            },
            momentum: StrategyToggle {
                enabled: true,
                weight: 80,
            },
            ..AggregatorConfig::default()
        };
        let aggregator = SignalAggregator::new(config).unwrap();
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1010;
        snapshot.macd = 0.0004;

        let signal = aggregator.evaluate(&snapshot);
        assert_eq!(signal.confidence, 100);
    }

    #[test]
    fn test_disabled_strategy_casts_no_votes() {
        let config = AggregatorConfig {
            trend: StrategyToggle {
                enabled: false,
                weight: 25,
            },
            ..AggregatorConfig::default()
        };
        let aggregator = SignalAggregator::new(config).unwrap();
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1010; // would be trend buy
        snapshot.rsi = 30.0;
        snapshot.current_price = snapshot.bb_lower;

        // Only the two mean-reversion votes remain: 50, still a buy.
        let signal = aggregator.evaluate(&snapshot);
        assert_eq!(signal.direction, Some(Side::Buy));
        assert_eq!(signal.confidence, 50);
    }

    #[test]
    fn test_volume_confirmation_vetoes_thin_markets() {
        let config = AggregatorConfig {
            volume_confirmation: true,
            ..AggregatorConfig::default()
        };
        let aggregator = SignalAggregator::new(config).unwrap();
        let mut snapshot = neutral_snapshot();
        snapshot.ema_fast = 1.1010;
        snapshot.rsi = 30.0;
        snapshot.current_price = snapshot.bb_lower;
        snapshot.current_volume = 1_200.0; // below 1000 * 1.5

        let signal = aggregator.evaluate(&snapshot);
        assert!(!signal.is_actionable());
        assert_eq!(signal.reason, "Volume below confirmation threshold");

        snapshot.current_volume = 1_600.0;
        assert!(aggregator.evaluate(&snapshot).is_actionable());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AggregatorConfig::default();
        assert!(config.validate().is_ok());

        config.rsi_oversold = 70.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_strategies_disabled_is_rejected() {
        let mut config = AggregatorConfig::default();
        config.trend.enabled = false;
        config.mean_reversion.enabled = false;
        config.momentum.enabled = false;
        config.breakout.weight = 0;
        assert!(config.validate().is_err());
    }
}
