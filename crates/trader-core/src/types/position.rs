//! Open position and closed trade types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Side;

/// Why a position (or part of one) was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    TakeProfit,
    StopLoss,
    Manual,
    Partial,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::TakeProfit => write!(f, "TP"),
            CloseReason::StopLoss => write!(f, "SL"),
            CloseReason::Manual => write!(f, "MANUAL"),
            CloseReason::Partial => write!(f, "PARTIAL"),
        }
    }
}

/// An open position tracked by the lifecycle manager.
///
/// Owned exclusively by the manager while open; removed from the tracked
/// set on confirmed closure, at which point its realized profit feeds the
/// risk state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub symbol: String,
    pub side: Side,
    /// Remaining volume in lots
    pub volume: Decimal,
    pub entry_price: f64,
    /// Stop-loss price; None when no stop is attached
    pub stop_loss: Option<f64>,
    /// Take-profit price; None when no target is attached
    pub take_profit: Option<f64>,
    pub open_time: DateTime<Utc>,
    /// Set once the one allowed partial close has happened
    pub partially_closed: bool,
}

impl Position {
    /// Open a new position at the given entry price.
    pub fn new(symbol: impl Into<String>, side: Side, volume: Decimal, entry_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            volume,
            entry_price,
            stop_loss: None,
            take_profit: None,
            open_time: Utc::now(),
            partially_closed: false,
        }
    }

    /// Attach stop-loss and take-profit prices.
    pub fn with_stops(mut self, stop_loss: Option<f64>, take_profit: Option<f64>) -> Self {
        self.stop_loss = stop_loss;
        self.take_profit = take_profit;
        self
    }

    /// Favorable price move from entry, in price units. Positive when the
    /// position is in profit.
    pub fn favorable_move(&self, current_price: f64) -> f64 {
        (current_price - self.entry_price) * self.side.sign()
    }

    /// Favorable price move from entry, in pips.
    pub fn favorable_move_pips(&self, current_price: f64, pip_size: f64) -> f64 {
        if pip_size <= 0.0 {
            return 0.0;
        }
        self.favorable_move(current_price) / pip_size
    }

    /// Realized profit if the given volume were closed at `exit_price`.
    ///
    /// `contract_value` is the account-currency value of a 1.0 price-unit
    /// move per 1.0 lot.
    pub fn profit_at(&self, exit_price: f64, volume: Decimal, contract_value: f64) -> Decimal {
        let per_lot = (exit_price - self.entry_price) * self.side.sign() * contract_value;
        Decimal::try_from(per_lot).unwrap_or_default() * volume
    }
}

/// Record of a completed (fully or partially) closed trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub symbol: String,
    pub side: Side,
    pub volume: Decimal,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Realized profit in account currency
    pub profit: Decimal,
    pub reason: CloseReason,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_favorable_move() {
        let long = Position::new("EURUSD", Side::Buy, dec!(0.10), 1.1000);
        assert!((long.favorable_move(1.1020) - 0.0020).abs() < 1e-9);
        assert!((long.favorable_move(1.0980) + 0.0020).abs() < 1e-9);

        let short = Position::new("EURUSD", Side::Sell, dec!(0.10), 1.1000);
        assert!((short.favorable_move(1.0980) - 0.0020).abs() < 1e-9);

        assert!((long.favorable_move_pips(1.1020, 0.0001) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_profit_at() {
        let long = Position::new("EURUSD", Side::Buy, dec!(0.50), 1.1000);

        // 20 pips on a major: 0.0020 * 100000 = $200 per lot
        let profit = long.profit_at(1.1020, dec!(0.50), 100_000.0);
        assert!((profit - dec!(100)).abs() < dec!(0.01));

        let short = Position::new("EURUSD", Side::Sell, dec!(0.50), 1.1000);
        let loss = short.profit_at(1.1020, dec!(0.50), 100_000.0);
        assert!((loss + dec!(100)).abs() < dec!(0.01));
    }
}
