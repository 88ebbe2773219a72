//! Open-position lifecycle: closure triggers, trailing stops and
//! partial closes.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use trader_core::{CloseReason, Position, Quote, Side, SymbolSpec, TradingError};

/// Thresholds for position management, in pips of favorable movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub trailing_enabled: bool,
    /// Favorable move required before the stop starts trailing.
    pub trailing_activation_pips: f64,
    /// Distance the trailed stop keeps behind the current price.
    pub trailing_distance_pips: f64,
    pub breakeven_enabled: bool,
    /// Favorable move at which the stop is pulled to the entry price.
    pub breakeven_activation_pips: f64,
    pub partial_close_enabled: bool,
    /// Favorable move at which part of the position is banked.
    pub partial_close_activation_pips: f64,
    pub partial_close_percent: Decimal,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            trailing_enabled: true,
            trailing_activation_pips: 15.0,
            trailing_distance_pips: 15.0,
            breakeven_enabled: true,
            breakeven_activation_pips: 10.0,
            partial_close_enabled: true,
            partial_close_activation_pips: 20.0,
            partial_close_percent: dec!(50),
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self) -> Result<(), TradingError> {
        if self.trailing_activation_pips < 0.0
            || self.trailing_distance_pips <= 0.0
            || self.breakeven_activation_pips < 0.0
            || self.partial_close_activation_pips < 0.0
        {
            return Err(TradingError::Validation(
                "lifecycle pip thresholds must not be negative".to_string(),
            ));
        }
        if self.partial_close_percent <= Decimal::ZERO
            || self.partial_close_percent >= dec!(100)
        {
            return Err(TradingError::Validation(
                "partial close percent must lie strictly between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

/// The single action requested for a position this cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionAction {
    Close { reason: CloseReason },
    PartialClose { volume: Decimal },
    ModifyStop { new_stop: f64 },
}

/// Evaluates open positions against the current quote.
///
/// At most one action per position per cycle, in priority order:
/// take-profit close, stop-loss close, stop adjustment, partial close.
/// Longs are valued at the bid, shorts at the ask.
#[derive(Debug, Clone)]
pub struct LifecycleManager {
    config: LifecycleConfig,
}

impl LifecycleManager {
    pub fn new(config: LifecycleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        position: &Position,
        quote: &Quote,
        spec: &SymbolSpec,
    ) -> Option<PositionAction> {
        let price = match position.side {
            Side::Buy => quote.bid,
            Side::Sell => quote.ask,
        };

        if let Some(tp) = position.take_profit {
            let reached = match position.side {
                Side::Buy => price >= tp,
                Side::Sell => price <= tp,
            };
            if reached {
                return Some(PositionAction::Close {
                    reason: CloseReason::TakeProfit,
                });
            }
        }

        if let Some(sl) = position.stop_loss {
            let hit = match position.side {
                Side::Buy => price <= sl,
                Side::Sell => price >= sl,
            };
            if hit {
                return Some(PositionAction::Close {
                    reason: CloseReason::StopLoss,
                });
            }
        }

        let move_pips = position.favorable_move_pips(price, spec.pip_size);

        if let Some(new_stop) = self.stop_adjustment(position, price, move_pips, spec) {
            return Some(PositionAction::ModifyStop { new_stop });
        }

        if self.config.partial_close_enabled
            && !position.partially_closed
            && move_pips >= self.config.partial_close_activation_pips
        {
            let volume = (position.volume * self.config.partial_close_percent / dec!(100))
                .round_dp_with_strategy(2, RoundingStrategy::ToZero);
            if volume > Decimal::ZERO {
                return Some(PositionAction::PartialClose { volume });
            }
        }

        None
    }

    /// Picks the candidate stop for the current favorable move and
    /// accepts it only when it strictly improves on the existing stop,
    /// so a trailed stop never loosens.
    fn stop_adjustment(
        &self,
        position: &Position,
        price: f64,
        move_pips: f64,
        spec: &SymbolSpec,
    ) -> Option<f64> {
        let candidate = if self.config.trailing_enabled
            && move_pips >= self.config.trailing_activation_pips
        {
            let distance = spec.pips_to_price(self.config.trailing_distance_pips);
            match position.side {
                Side::Buy => price - distance,
                Side::Sell => price + distance,
            }
        } else if self.config.breakeven_enabled
            && move_pips >= self.config.breakeven_activation_pips
        {
            position.entry_price
        } else {
            return None;
        };

        let improves = match (position.side, position.stop_loss) {
            (Side::Buy, Some(sl)) => candidate > sl,
            (Side::Sell, Some(sl)) => candidate < sl,
            (_, None) => true,
        };
        improves.then_some(candidate)
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self {
            config: LifecycleConfig::default(),
        }
    }
}
