//! The ordered pre-trade risk gate.

use chrono::{DateTime, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use trader_core::{AccountInfo, TradingError};

use crate::state::RiskState;

/// Hard limits consulted by the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Stop for the day once today's P&L is at or below the negative of this.
    pub max_daily_loss: Decimal,
    /// Stop for the day once today's P&L reaches this.
    pub max_daily_profit: Decimal,
    pub max_drawdown_percent: Decimal,
    pub max_consecutive_losses: u32,
    pub max_consecutive_wins: u32,
    /// Trading session window, inclusive on both ends (hours, 0-23).
    pub session_start_hour: u32,
    pub session_end_hour: u32,
    pub min_trade_interval_secs: i64,
    pub max_trades_per_session: u32,
    /// Spread ceiling in symbol points; symbols may override it.
    pub max_spread_points: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_daily_loss: dec!(500),
            max_daily_profit: dec!(2000),
            max_drawdown_percent: dec!(10),
            max_consecutive_losses: 3,
            max_consecutive_wins: 5,
            session_start_hour: 8,
            session_end_hour: 20,
            min_trade_interval_secs: 30,
            max_trades_per_session: 10,
            max_spread_points: 30.0,
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<(), TradingError> {
        if self.session_start_hour > 23 || self.session_end_hour > 23 {
            return Err(TradingError::Validation(
                "session hours must lie within 0-23".to_string(),
            ));
        }
        if self.session_start_hour > self.session_end_hour {
            return Err(TradingError::Validation(
                "session start hour must not be after the end hour".to_string(),
            ));
        }
        if self.max_daily_loss < Decimal::ZERO || self.max_daily_profit < Decimal::ZERO {
            return Err(TradingError::Validation(
                "daily loss and profit limits must not be negative".to_string(),
            ));
        }
        if self.min_trade_interval_secs < 0 {
            return Err(TradingError::Validation(
                "trade interval must not be negative".to_string(),
            ));
        }
        if self.max_spread_points <= 0.0 {
            return Err(TradingError::Validation(
                "max spread must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one gate evaluation. Computed fresh per trade attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Allowed,
    Denied { reason: String },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allowed)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            GateDecision::Allowed => None,
            GateDecision::Denied { reason } => Some(reason),
        }
    }

    fn denied(reason: impl Into<String>) -> Self {
        GateDecision::Denied {
            reason: reason.into(),
        }
    }
}

/// Live inputs for one evaluation, sampled by the caller.
#[derive(Debug, Clone)]
pub struct GateContext<'a> {
    pub connected: bool,
    pub account: &'a AccountInfo,
    /// Current quote spread in symbol points.
    pub spread_points: f64,
    /// Per-symbol spread ceiling, overriding the configured default.
    pub max_spread_override: Option<f64>,
    pub news_blackout: bool,
    pub now: DateTime<Utc>,
}

/// Runs the pre-trade checks in a fixed order; the first denial wins.
///
/// Every check is a pure read; the gate never mutates the risk state.
#[derive(Debug, Clone)]
pub struct RiskGate {
    config: GateConfig,
}

impl RiskGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn evaluate(&self, state: &RiskState, ctx: &GateContext<'_>) -> GateDecision {
        if !ctx.connected {
            return GateDecision::denied("Not connected");
        }

        if state.pnl_today <= -self.config.max_daily_loss {
            return GateDecision::denied("Max daily loss reached");
        }

        if state.pnl_today >= self.config.max_daily_profit {
            return GateDecision::denied("Daily profit target reached");
        }

        if ctx.account.drawdown_percent() >= self.config.max_drawdown_percent {
            return GateDecision::denied("Max drawdown reached");
        }

        if state.consecutive_losses >= self.config.max_consecutive_losses {
            return GateDecision::denied(format!(
                "Max consecutive losses ({}) reached",
                self.config.max_consecutive_losses
            ));
        }

        if state.consecutive_wins >= self.config.max_consecutive_wins {
            return GateDecision::denied(format!(
                "Take break after {} wins",
                self.config.max_consecutive_wins
            ));
        }

        let hour = ctx.now.hour();
        if hour < self.config.session_start_hour || hour > self.config.session_end_hour {
            return GateDecision::denied("Outside trading hours");
        }

        if ctx.news_blackout {
            return GateDecision::denied("News blackout - no trading");
        }

        if let Some(last) = state.last_trade_time {
            let elapsed = (ctx.now - last).num_seconds();
            if elapsed < self.config.min_trade_interval_secs {
                return GateDecision::denied(format!(
                    "Waiting {}s between trades",
                    self.config.min_trade_interval_secs - elapsed
                ));
            }
        }

        if state.trades_today >= self.config.max_trades_per_session {
            return GateDecision::denied("Max trades per session reached");
        }

        let max_spread = ctx
            .max_spread_override
            .unwrap_or(self.config.max_spread_points);
        if ctx.spread_points > max_spread {
            return GateDecision::denied(format!(
                "Spread too high: {:.0} points",
                ctx.spread_points
            ));
        }

        GateDecision::Allowed
    }
}
