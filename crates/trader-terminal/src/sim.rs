//! In-memory simulated terminal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use trader_core::{
    AccountInfo, Candle, CloseReason, ClosedTrade, CloseRequest, ModifyRequest, OrderRequest,
    Position, Quote, Side, SymbolLimits, SymbolSpec, Terminal, TerminalError, Timeframe,
};
use uuid::Uuid;

#[derive(Debug)]
struct SimState {
    connected: bool,
    balance: Decimal,
    candles: HashMap<String, Vec<Candle>>,
    quotes: HashMap<String, Quote>,
    limits: HashMap<String, SymbolLimits>,
    specs: HashMap<String, SymbolSpec>,
    positions: HashMap<Uuid, Position>,
}

/// Simulated terminal driven by scripted candles and quotes.
///
/// Orders fill instantly at the quoted ask (buys) or bid (sells), with
/// no slippage. Equity is the balance plus unrealized P&L over open
/// positions, so adverse quote moves produce a drawdown just like a
/// live account.
pub struct SimTerminal {
    inner: Arc<Mutex<SimState>>,
}

impl SimTerminal {
    pub fn new(balance: Decimal) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SimState {
                connected: true,
                balance,
                candles: HashMap::new(),
                quotes: HashMap::new(),
                limits: HashMap::new(),
                specs: HashMap::new(),
                positions: HashMap::new(),
            })),
        }
    }

    /// Register a tradable symbol with its metadata and volume limits.
    pub fn with_symbol(
        self,
        symbol: impl Into<String>,
        spec: SymbolSpec,
        limits: SymbolLimits,
    ) -> Self {
        let symbol = symbol.into();
        {
            let mut state = self.inner.lock().unwrap();
            state.specs.insert(symbol.clone(), spec);
            state.limits.insert(symbol, limits);
        }
        self
    }

    /// Replace the scripted candle history for a symbol.
    pub fn set_candles(&self, symbol: impl Into<String>, candles: Vec<Candle>) {
        self.inner.lock().unwrap().candles.insert(symbol.into(), candles);
    }

    /// Append one candle to a symbol's history.
    pub fn push_candle(&self, symbol: impl Into<String>, candle: Candle) {
        self.inner
            .lock()
            .unwrap()
            .candles
            .entry(symbol.into())
            .or_default()
            .push(candle);
    }

    pub fn set_quote(&self, symbol: impl Into<String>, bid: f64, ask: f64) {
        let symbol = symbol.into();
        let quote = Quote {
            symbol: symbol.clone(),
            bid,
            ask,
            timestamp: Utc::now().timestamp_millis(),
        };
        self.inner.lock().unwrap().quotes.insert(symbol, quote);
    }

    pub fn set_connected(&self, connected: bool) {
        self.inner.lock().unwrap().connected = connected;
    }

    pub fn set_balance(&self, balance: Decimal) {
        self.inner.lock().unwrap().balance = balance;
    }

    /// Number of currently open positions.
    pub fn open_position_count(&self) -> usize {
        self.inner.lock().unwrap().positions.len()
    }

    pub fn position(&self, id: Uuid) -> Option<Position> {
        self.inner.lock().unwrap().positions.get(&id).cloned()
    }

    fn contract_value(state: &SimState, symbol: &str) -> f64 {
        state
            .specs
            .get(symbol)
            .map(|spec| spec.contract_value)
            .unwrap_or(100_000.0)
    }

    fn unrealized(state: &SimState) -> Decimal {
        state
            .positions
            .values()
            .filter_map(|position| {
                let quote = state.quotes.get(&position.symbol)?;
                let exit = match position.side {
                    Side::Buy => quote.bid,
                    Side::Sell => quote.ask,
                };
                let contract = Self::contract_value(state, &position.symbol);
                Some(position.profit_at(exit, position.volume, contract))
            })
            .sum()
    }
}

#[async_trait]
impl Terminal for SimTerminal {
    async fn is_connected(&self) -> bool {
        self.inner.lock().unwrap().connected
    }

    async fn candles(
        &self,
        symbol: &str,
        _timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Candle>, TerminalError> {
        let state = self.inner.lock().unwrap();
        if !state.connected {
            return Err(TerminalError::NotConnected);
        }
        let series = state
            .candles
            .get(symbol)
            .ok_or_else(|| TerminalError::SymbolNotFound(symbol.to_string()))?;
        let start = series.len().saturating_sub(count);
        Ok(series[start..].to_vec())
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, TerminalError> {
        let state = self.inner.lock().unwrap();
        if !state.connected {
            return Err(TerminalError::NotConnected);
        }
        state
            .quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| TerminalError::SymbolNotFound(symbol.to_string()))
    }

    async fn account(&self) -> Result<AccountInfo, TerminalError> {
        let state = self.inner.lock().unwrap();
        if !state.connected {
            return Err(TerminalError::NotConnected);
        }
        Ok(AccountInfo {
            balance: state.balance,
            equity: state.balance + Self::unrealized(&state),
        })
    }

    async fn symbol_limits(&self, symbol: &str) -> Result<SymbolLimits, TerminalError> {
        let state = self.inner.lock().unwrap();
        if !state.connected {
            return Err(TerminalError::NotConnected);
        }
        state
            .limits
            .get(symbol)
            .cloned()
            .ok_or_else(|| TerminalError::SymbolNotFound(symbol.to_string()))
    }

    async fn open_position(&self, request: &OrderRequest) -> Result<Position, TerminalError> {
        let mut state = self.inner.lock().unwrap();
        if !state.connected {
            return Err(TerminalError::NotConnected);
        }
        if request.volume <= Decimal::ZERO {
            return Err(TerminalError::OrderRejected(
                "volume must be positive".to_string(),
            ));
        }
        let quote = state
            .quotes
            .get(&request.symbol)
            .ok_or_else(|| TerminalError::SymbolNotFound(request.symbol.clone()))?;
        let entry = match request.side {
            Side::Buy => quote.ask,
            Side::Sell => quote.bid,
        };

        let position = Position::new(&request.symbol, request.side, request.volume, entry)
            .with_stops(request.stop_loss, request.take_profit);
        state.positions.insert(position.id, position.clone());
        Ok(position)
    }

    async fn modify_stop(&self, request: &ModifyRequest) -> Result<(), TerminalError> {
        let mut state = self.inner.lock().unwrap();
        if !state.connected {
            return Err(TerminalError::NotConnected);
        }
        let position = state
            .positions
            .get_mut(&request.position_id)
            .ok_or_else(|| TerminalError::PositionNotFound(request.position_id.to_string()))?;
        position.stop_loss = Some(request.new_stop_loss);
        Ok(())
    }

    async fn close_position(
        &self,
        request: &CloseRequest,
        reason: CloseReason,
    ) -> Result<ClosedTrade, TerminalError> {
        let mut state = self.inner.lock().unwrap();
        if !state.connected {
            return Err(TerminalError::NotConnected);
        }
        let position = state
            .positions
            .get(&request.position_id)
            .cloned()
            .ok_or_else(|| TerminalError::PositionNotFound(request.position_id.to_string()))?;
        if request.volume <= Decimal::ZERO || request.volume > position.volume {
            return Err(TerminalError::InvalidRequest(format!(
                "close volume {} outside open volume {}",
                request.volume, position.volume
            )));
        }

        let quote = state
            .quotes
            .get(&position.symbol)
            .ok_or_else(|| TerminalError::SymbolNotFound(position.symbol.clone()))?;
        let exit = match position.side {
            Side::Buy => quote.bid,
            Side::Sell => quote.ask,
        };
        let contract = Self::contract_value(&state, &position.symbol);
        let profit = position.profit_at(exit, request.volume, contract);

        state.balance += profit;
        if request.volume == position.volume {
            state.positions.remove(&request.position_id);
        } else if let Some(open) = state.positions.get_mut(&request.position_id) {
            open.volume -= request.volume;
            open.partially_closed = true;
        }

        Ok(ClosedTrade {
            symbol: position.symbol,
            side: position.side,
            volume: request.volume,
            entry_price: position.entry_price,
            exit_price: exit,
            profit,
            reason,
            open_time: position.open_time,
            close_time: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "sim"
    }
}
