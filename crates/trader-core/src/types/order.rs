//! Order request types produced for the broker terminal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Directional sign: +1 for buy, -1 for sell.
    pub fn sign(&self) -> f64 {
        match self {
            Side::Buy => 1.0,
            Side::Sell => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Request to open a market position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Symbol to trade
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Volume in lots
    pub volume: Decimal,
    /// Stop-loss price, if any
    pub stop_loss: Option<f64>,
    /// Take-profit price, if any
    pub take_profit: Option<f64>,
    /// Free-form comment attached to the order
    pub comment: String,
}

impl OrderRequest {
    /// Create a market order request without stops.
    pub fn market(symbol: impl Into<String>, side: Side, volume: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            volume,
            stop_loss: None,
            take_profit: None,
            comment: String::new(),
        }
    }

    /// Attach stop-loss and take-profit prices.
    pub fn with_stops(mut self, stop_loss: Option<f64>, take_profit: Option<f64>) -> Self {
        self.stop_loss = stop_loss;
        self.take_profit = take_profit;
        self
    }

    /// Attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Request to move the stop of an open position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModifyRequest {
    /// Position to modify
    pub position_id: Uuid,
    /// New stop-loss price
    pub new_stop_loss: f64,
}

/// Request to close all or part of an open position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseRequest {
    /// Position to close
    pub position_id: Uuid,
    /// Volume to close, in lots; the position's full volume closes it
    pub volume: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
        assert_eq!(Side::Buy.sign(), 1.0);
        assert_eq!(Side::Sell.sign(), -1.0);
        assert_eq!(Side::Buy.to_string(), "BUY");
    }

    #[test]
    fn test_order_request_builders() {
        let request = OrderRequest::market("EURUSD", Side::Buy, dec!(0.10))
            .with_stops(Some(1.0980), Some(1.1060))
            .with_comment("scan");

        assert_eq!(request.symbol, "EURUSD");
        assert_eq!(request.volume, dec!(0.10));
        assert_eq!(request.stop_loss, Some(1.0980));
        assert_eq!(request.take_profit, Some(1.1060));
        assert_eq!(request.comment, "scan");
    }
}
