//! In-memory trade performance tracking.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use trader_core::ClosedTrade;

/// Aggregate statistics over every recorded trade.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage of trades closed in profit
    pub win_rate: f64,
    pub total_profit: Decimal,
    /// Mean profit of winning trades; zero when there are none
    pub avg_win: Decimal,
    /// Mean profit of losing trades (non-positive); zero when there are none
    pub avg_loss: Decimal,
    /// Gross profit over gross loss; None until the first losing trade
    pub profit_factor: Option<Decimal>,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
}

/// Rolling log of closed trades for the current process.
///
/// Breakeven closes count as losses, consistent with the risk state's
/// win/loss accounting.
#[derive(Debug, Default)]
pub struct TradeRecorder {
    trades: Vec<ClosedTrade>,
}

impl TradeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed trade to the log.
    pub fn record(&mut self, trade: ClosedTrade) {
        debug!(
            symbol = %trade.symbol,
            side = %trade.side,
            profit = %trade.profit,
            reason = %trade.reason,
            "trade recorded"
        );
        self.trades.push(trade);
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// All recorded trades, oldest first.
    pub fn trades(&self) -> &[ClosedTrade] {
        &self.trades
    }

    /// Compute summary statistics over the recorded trades.
    pub fn summary(&self) -> PerformanceSummary {
        let total_trades = self.trades.len();
        let mut wins = 0usize;
        let mut losses = 0usize;
        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;
        let mut total_profit = Decimal::ZERO;
        let mut best_trade = Decimal::ZERO;
        let mut worst_trade = Decimal::ZERO;

        for trade in &self.trades {
            total_profit += trade.profit;
            best_trade = best_trade.max(trade.profit);
            worst_trade = worst_trade.min(trade.profit);
            if trade.profit > Decimal::ZERO {
                wins += 1;
                gross_profit += trade.profit;
            } else {
                losses += 1;
                gross_loss += trade.profit;
            }
        }

        let win_rate = if total_trades > 0 {
            wins as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };
        let avg_win = if wins > 0 {
            gross_profit / Decimal::from(wins as u64)
        } else {
            Decimal::ZERO
        };
        let avg_loss = if losses > 0 {
            gross_loss / Decimal::from(losses as u64)
        } else {
            Decimal::ZERO
        };
        let profit_factor = if gross_loss < Decimal::ZERO {
            Some(gross_profit / gross_loss.abs())
        } else {
            None
        };

        PerformanceSummary {
            total_trades,
            wins,
            losses,
            win_rate,
            total_profit,
            avg_win,
            avg_loss,
            profit_factor,
            best_trade,
            worst_trade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use trader_core::{CloseReason, Side};

    fn trade(profit: Decimal) -> ClosedTrade {
        ClosedTrade {
            symbol: "EURUSD".to_string(),
            side: Side::Buy,
            volume: dec!(0.10),
            entry_price: 1.1000,
            exit_price: 1.1020,
            profit,
            reason: CloseReason::TakeProfit,
            open_time: Utc::now(),
            close_time: Utc::now(),
        }
    }

    #[test]
    fn test_empty_recorder_summary() {
        let recorder = TradeRecorder::new();
        let summary = recorder.summary();

        assert!(recorder.is_empty());
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.total_profit, Decimal::ZERO);
        assert_eq!(summary.profit_factor, None);
    }

    #[test]
    fn test_summary_over_mixed_trades() {
        let mut recorder = TradeRecorder::new();
        recorder.record(trade(dec!(100)));
        recorder.record(trade(dec!(60)));
        recorder.record(trade(dec!(-40)));
        recorder.record(trade(dec!(-40)));

        let summary = recorder.summary();
        assert_eq!(summary.total_trades, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.win_rate, 50.0);
        assert_eq!(summary.total_profit, dec!(80));
        assert_eq!(summary.avg_win, dec!(80));
        assert_eq!(summary.avg_loss, dec!(-40));
        assert_eq!(summary.profit_factor, Some(dec!(2)));
        assert_eq!(summary.best_trade, dec!(100));
        assert_eq!(summary.worst_trade, dec!(-40));
    }

    #[test]
    fn test_breakeven_counts_as_loss() {
        let mut recorder = TradeRecorder::new();
        recorder.record(trade(Decimal::ZERO));

        let summary = recorder.summary();
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 1);
        // A zero-profit loss contributes no gross loss, so the factor
        // stays undefined.
        assert_eq!(summary.profit_factor, None);
    }

    #[test]
    fn test_all_wins_has_no_profit_factor() {
        let mut recorder = TradeRecorder::new();
        recorder.record(trade(dec!(50)));
        recorder.record(trade(dec!(25)));

        let summary = recorder.summary();
        assert_eq!(summary.win_rate, 100.0);
        assert_eq!(summary.profit_factor, None);
        assert_eq!(summary.worst_trade, Decimal::ZERO);
    }
}
