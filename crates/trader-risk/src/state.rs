//! The adaptive risk ledger.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use trader_core::TradingError;

/// Adaptive risk configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Risk percent restored at the start of each trading day.
    pub default_risk_percent: Decimal,
    pub min_risk_percent: Decimal,
    pub max_risk_percent: Decimal,
    /// Scale risk up after wins and down after losses.
    pub adaptive_risk: bool,
    pub win_multiplier: Decimal,
    pub loss_divider: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            default_risk_percent: dec!(1.0),
            min_risk_percent: dec!(0.5),
            max_risk_percent: dec!(3.0),
            adaptive_risk: true,
            win_multiplier: dec!(1.2),
            loss_divider: dec!(0.5),
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> Result<(), TradingError> {
        if self.min_risk_percent <= Decimal::ZERO {
            return Err(TradingError::Validation(
                "min risk percent must be positive".to_string(),
            ));
        }
        if self.min_risk_percent > self.max_risk_percent {
            return Err(TradingError::Validation(
                "min risk percent must not exceed max risk percent".to_string(),
            ));
        }
        if self.default_risk_percent < self.min_risk_percent
            || self.default_risk_percent > self.max_risk_percent
        {
            return Err(TradingError::Validation(
                "default risk percent must lie within the min/max bounds".to_string(),
            ));
        }
        if self.win_multiplier < Decimal::ONE {
            return Err(TradingError::Validation(
                "win multiplier must be at least 1".to_string(),
            ));
        }
        if self.loss_divider <= Decimal::ZERO || self.loss_divider > Decimal::ONE {
            return Err(TradingError::Validation(
                "loss divider must lie in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-day trading counters, streaks and the current risk percentage.
///
/// One instance per running bot. Mutated only by [`roll_day`],
/// [`record_open`] and [`record_close`]; the gate and sizer read it.
/// `current_risk_percent` stays within the configured min/max bounds
/// after every update.
///
/// [`roll_day`]: RiskState::roll_day
/// [`record_open`]: RiskState::record_open
/// [`record_close`]: RiskState::record_close
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskState {
    pub day_key: NaiveDate,
    pub trades_today: u32,
    pub wins_today: u32,
    pub losses_today: u32,
    pub pnl_today: Decimal,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    pub current_risk_percent: Decimal,
    pub last_trade_time: Option<DateTime<Utc>>,
}

impl RiskState {
    pub fn new(now: DateTime<Utc>, config: &RiskConfig) -> Self {
        Self {
            day_key: now.date_naive(),
            trades_today: 0,
            wins_today: 0,
            losses_today: 0,
            pnl_today: Decimal::ZERO,
            consecutive_wins: 0,
            consecutive_losses: 0,
            current_risk_percent: config
                .default_risk_percent
                .clamp(config.min_risk_percent, config.max_risk_percent),
            last_trade_time: None,
        }
    }

    /// Resets the daily counters when the calendar day has changed.
    /// Returns true when a reset happened. Calling again within the same
    /// day is a no-op, so each boundary resets exactly once.
    pub fn roll_day(&mut self, now: DateTime<Utc>, config: &RiskConfig) -> bool {
        let today = now.date_naive();
        if today == self.day_key {
            return false;
        }

        self.day_key = today;
        self.trades_today = 0;
        self.wins_today = 0;
        self.losses_today = 0;
        self.pnl_today = Decimal::ZERO;
        self.consecutive_wins = 0;
        self.consecutive_losses = 0;
        self.current_risk_percent = config
            .default_risk_percent
            .clamp(config.min_risk_percent, config.max_risk_percent);
        true
    }

    /// Records a newly opened trade.
    pub fn record_open(&mut self, now: DateTime<Utc>) {
        self.trades_today += 1;
        self.last_trade_time = Some(now);
    }

    /// Records a realized profit and adapts the risk percentage.
    ///
    /// A profit of exactly zero counts as a loss.
    pub fn record_close(&mut self, profit: Decimal, config: &RiskConfig) {
        self.pnl_today += profit;

        if profit > Decimal::ZERO {
            self.wins_today += 1;
            self.consecutive_wins += 1;
            self.consecutive_losses = 0;
            if config.adaptive_risk {
                self.current_risk_percent = (self.current_risk_percent * config.win_multiplier)
                    .min(config.max_risk_percent);
            }
        } else {
            self.losses_today += 1;
            self.consecutive_losses += 1;
            self.consecutive_wins = 0;
            if config.adaptive_risk {
                self.current_risk_percent = (self.current_risk_percent * config.loss_divider)
                    .max(config.min_risk_percent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_wins_scale_risk_up_to_the_cap() {
        let config = RiskConfig::default();
        let mut state = RiskState::new(at(2024, 3, 4, 9), &config);

        for _ in 0..10 {
            state.record_close(dec!(50), &config);
        }

        // 1.0 * 1.2^10 would be ~6.19; capped at 3.0.
        assert_eq!(state.current_risk_percent, dec!(3.0));
        assert_eq!(state.consecutive_wins, 10);
        assert_eq!(state.consecutive_losses, 0);
        assert_eq!(state.pnl_today, dec!(500));
    }

    #[test]
    fn test_losses_scale_risk_down_to_the_floor() {
        let config = RiskConfig::default();
        let mut state = RiskState::new(at(2024, 3, 4, 9), &config);

        for _ in 0..5 {
            state.record_close(dec!(-40), &config);
        }

        assert_eq!(state.current_risk_percent, dec!(0.5));
        assert_eq!(state.consecutive_losses, 5);
        assert_eq!(state.losses_today, 5);
    }

    #[test]
    fn test_risk_stays_bounded_under_mixed_sequences() {
        let config = RiskConfig::default();
        let mut state = RiskState::new(at(2024, 3, 4, 9), &config);

        let profits = [
            dec!(10), dec!(-5), dec!(-5), dec!(20), dec!(20), dec!(20), dec!(20), dec!(-1),
            dec!(0), dec!(35), dec!(-80), dec!(15),
        ];
        for p in profits {
            state.record_close(p, &config);
            assert!(state.current_risk_percent >= config.min_risk_percent);
            assert!(state.current_risk_percent <= config.max_risk_percent);
        }
    }

    #[test]
    fn test_zero_profit_counts_as_loss() {
        let config = RiskConfig::default();
        let mut state = RiskState::new(at(2024, 3, 4, 9), &config);

        state.record_close(Decimal::ZERO, &config);
        assert_eq!(state.losses_today, 1);
        assert_eq!(state.consecutive_losses, 1);
        assert_eq!(state.current_risk_percent, dec!(0.5));
    }

    #[test]
    fn test_day_rollover_resets_exactly_once() {
        let config = RiskConfig::default();
        let mut state = RiskState::new(at(2024, 3, 4, 9), &config);

        state.record_open(at(2024, 3, 4, 10));
        state.record_close(dec!(75), &config);
        state.record_close(dec!(75), &config);
        assert_eq!(state.trades_today, 1);
        assert_ne!(state.current_risk_percent, config.default_risk_percent);

        assert!(state.roll_day(at(2024, 3, 5, 0), &config));
        assert_eq!(state.day_key, at(2024, 3, 5, 0).date_naive());
        assert_eq!(state.trades_today, 0);
        assert_eq!(state.wins_today, 0);
        assert_eq!(state.pnl_today, Decimal::ZERO);
        assert_eq!(state.consecutive_wins, 0);
        assert_eq!(state.current_risk_percent, config.default_risk_percent);

        // Same day again: nothing to do.
        assert!(!state.roll_day(at(2024, 3, 5, 8), &config));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RiskConfig::default();
        assert!(config.validate().is_ok());

        config.default_risk_percent = dec!(5.0);
        assert!(config.validate().is_err());

        config = RiskConfig {
            loss_divider: dec!(1.5),
            ..RiskConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
