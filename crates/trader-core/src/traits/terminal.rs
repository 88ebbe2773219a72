//! Broker terminal trait definition.

use crate::error::TerminalError;
use crate::types::{
    Candle, CloseReason, CloseRequest, ClosedTrade, ModifyRequest, OrderRequest, Position,
    Timeframe,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A live bid/ask quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Best bid price
    pub bid: f64,
    /// Best ask price
    pub ask: f64,
    /// Timestamp (Unix milliseconds)
    pub timestamp: i64,
}

impl Quote {
    /// Get the mid price.
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Get the spread in price units.
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// Get the spread in symbol points.
    pub fn spread_points(&self, point: f64) -> f64 {
        if point <= 0.0 {
            return 0.0;
        }
        self.spread() / point
    }
}

/// Account balance and equity snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccountInfo {
    pub balance: Decimal,
    pub equity: Decimal,
}

impl AccountInfo {
    /// Percentage decline of equity below balance; zero when flat or in
    /// profit.
    pub fn drawdown_percent(&self) -> Decimal {
        if self.balance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let dd = (self.balance - self.equity) / self.balance * Decimal::ONE_HUNDRED;
        dd.max(Decimal::ZERO)
    }
}

/// Volume limits and quote precision for one instrument, as reported by
/// the terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SymbolLimits {
    /// Minimum volume in lots
    pub volume_min: Decimal,
    /// Maximum volume in lots
    pub volume_max: Decimal,
    /// Volume increment in lots
    pub volume_step: Decimal,
    /// Smallest quote increment
    pub point: f64,
}

/// The broker terminal collaborator.
///
/// Everything venue-specific lives behind this trait: candle history,
/// quotes, account state, and order execution. The decision core only
/// consumes these calls and produces order/modify/close requests.
#[async_trait]
pub trait Terminal: Send + Sync {
    /// Whether the terminal connection is usable right now.
    async fn is_connected(&self) -> bool;

    /// Fetch the most recent `count` candles, ordered oldest to newest.
    async fn candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, TerminalError>;

    /// Get the current quote for a symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote, TerminalError>;

    /// Get account balance and equity.
    async fn account(&self) -> Result<AccountInfo, TerminalError>;

    /// Get volume limits and quote precision for a symbol.
    async fn symbol_limits(&self, symbol: &str) -> Result<SymbolLimits, TerminalError>;

    /// Open a market position.
    ///
    /// # Returns
    /// The opened position with its venue-assigned entry price.
    async fn open_position(&self, request: &OrderRequest) -> Result<Position, TerminalError>;

    /// Move the stop of an open position.
    async fn modify_stop(&self, request: &ModifyRequest) -> Result<(), TerminalError>;

    /// Close all or part of an open position.
    ///
    /// # Returns
    /// The closed trade with its realized profit; `reason` is echoed into
    /// the record.
    async fn close_position(
        &self,
        request: &CloseRequest,
        reason: CloseReason,
    ) -> Result<ClosedTrade, TerminalError>;

    /// Get the terminal name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_calculations() {
        let quote = Quote {
            symbol: "EURUSD".to_string(),
            bid: 1.10000,
            ask: 1.10012,
            timestamp: 1000,
        };

        assert!((quote.mid() - 1.10006).abs() < 1e-9);
        assert!((quote.spread() - 0.00012).abs() < 1e-9);
        assert!((quote.spread_points(0.00001) - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_drawdown_percent() {
        let account = AccountInfo {
            balance: dec!(10000),
            equity: dec!(9200),
        };
        assert_eq!(account.drawdown_percent(), dec!(8));

        let healthy = AccountInfo {
            balance: dec!(10000),
            equity: dec!(10500),
        };
        assert_eq!(healthy.drawdown_percent(), Decimal::ZERO);
    }
}
