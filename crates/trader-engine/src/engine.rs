//! Scan loop and control surface.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use trader_core::{
    CandleSeries, CloseReason, CloseRequest, ClosedTrade, ModifyRequest, NewsCalendar, NoNews,
    OrderRequest, Position, Side, SymbolSpec, Terminal, TerminalError, Timeframe, TradingError,
    TradingResult,
};
use trader_indicators::{IndicatorEngine, Snapshot};
use trader_monitor::{PerformanceSummary, TradeRecorder};
use trader_risk::{
    GateConfig, GateContext, LifecycleManager, PositionAction, PositionSizer, RiskConfig, RiskGate,
    RiskState, StopPolicy,
};
use trader_signals::SignalAggregator;

/// Scan loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Symbols scanned each cycle, in priority order.
    pub symbols: Vec<String>,
    pub timeframe: Timeframe,
    /// Candle history fetched per snapshot.
    pub candle_count: usize,
    pub scan_interval_secs: u64,
    /// New positions stop opening once this many are already open.
    pub max_open_positions: usize,
    /// Added to the confidence threshold while on a losing streak.
    pub loss_confidence_bump: u32,
    /// Log intended orders without sending them.
    pub dry_run: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbols: [
                "EURUSD", "GBPUSD", "USDJPY", "XAUUSD", "AUDUSD", "USDCAD", "USDCHF", "NZDUSD",
                "EURJPY", "GBPJPY",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            timeframe: Timeframe::default(),
            candle_count: 100,
            scan_interval_secs: 1,
            max_open_positions: 3,
            loss_confidence_bump: 10,
            dry_run: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), TradingError> {
        if self.symbols.is_empty() {
            return Err(TradingError::Validation(
                "symbol list must not be empty".to_string(),
            ));
        }
        if self.candle_count == 0 {
            return Err(TradingError::Validation(
                "candle count must be positive".to_string(),
            ));
        }
        if self.scan_interval_secs == 0 {
            return Err(TradingError::Validation(
                "scan interval must be positive".to_string(),
            ));
        }
        if self.max_open_positions == 0 {
            return Err(TradingError::Validation(
                "max open positions must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Scan interval as a duration.
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

/// A point-in-time view of the engine for the control surface.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub running: bool,
    pub risk: RiskState,
    pub open_positions: Vec<Position>,
    pub performance: PerformanceSummary,
}

/// The autonomous scan loop.
///
/// Each cycle rolls the risk day, manages every open position against the
/// current quote, then scans the configured symbols for new entries.
/// Manual orders go through the same gate, sizer, and accounting as the
/// loop, so both paths share one risk history.
pub struct TradingEngine {
    config: EngineConfig,
    terminal: Arc<dyn Terminal>,
    news: Arc<dyn NewsCalendar>,
    indicators: IndicatorEngine,
    aggregator: SignalAggregator,
    gate: RiskGate,
    sizer: PositionSizer,
    lifecycle: LifecycleManager,
    stop_policy: StopPolicy,
    risk_config: RiskConfig,
    specs: HashMap<String, SymbolSpec>,
    state: Mutex<RiskState>,
    positions: Mutex<HashMap<Uuid, Position>>,
    recorder: Mutex<TradeRecorder>,
    running: AtomicBool,
    stop_flag: AtomicBool,
}

impl TradingEngine {
    /// Create an engine with default components over the given terminal.
    pub fn new(config: EngineConfig, terminal: Arc<dyn Terminal>) -> Self {
        let risk_config = RiskConfig::default();
        let state = RiskState::new(Utc::now(), &risk_config);
        Self {
            config,
            terminal,
            news: Arc::new(NoNews),
            indicators: IndicatorEngine::default(),
            aggregator: SignalAggregator::default(),
            gate: RiskGate::new(GateConfig::default()),
            sizer: PositionSizer::new(),
            lifecycle: LifecycleManager::default(),
            stop_policy: StopPolicy::default(),
            risk_config,
            specs: SymbolSpec::builtin(),
            state: Mutex::new(state),
            positions: Mutex::new(HashMap::new()),
            recorder: Mutex::new(TradeRecorder::new()),
            running: AtomicBool::new(false),
            stop_flag: AtomicBool::new(false),
        }
    }

    pub fn with_indicators(mut self, indicators: IndicatorEngine) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_aggregator(mut self, aggregator: SignalAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_gate(mut self, gate: RiskGate) -> Self {
        self.gate = gate;
        self
    }

    /// Replace the adaptive-risk configuration and reseed the risk state.
    pub fn with_risk_config(mut self, risk_config: RiskConfig) -> Self {
        self.state = Mutex::new(RiskState::new(Utc::now(), &risk_config));
        self.risk_config = risk_config;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecycleManager) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_stop_policy(mut self, stop_policy: StopPolicy) -> Self {
        self.stop_policy = stop_policy;
        self
    }

    pub fn with_news(mut self, news: Arc<dyn NewsCalendar>) -> Self {
        self.news = news;
        self
    }

    /// Replace the per-symbol metadata table.
    pub fn with_specs(mut self, specs: HashMap<String, SymbolSpec>) -> Self {
        self.specs = specs;
        self
    }

    /// Run the scan loop until [`stop`] is called.
    ///
    /// An in-flight cycle always completes; the flag is checked at the
    /// top of each iteration.
    ///
    /// [`stop`]: TradingEngine::stop
    pub async fn run(&self) {
        self.running.store(true, Ordering::SeqCst);
        info!(
            symbols = ?self.config.symbols,
            timeframe = %self.config.timeframe,
            interval_secs = self.config.scan_interval_secs,
            dry_run = self.config.dry_run,
            terminal = self.terminal.name(),
            "engine started"
        );

        while !self.stop_flag.load(Ordering::SeqCst) {
            self.cycle().await;
            tokio::time::sleep(self.config.scan_interval()).await;
        }

        self.running.store(false, Ordering::SeqCst);
        info!("engine stopped");
    }

    /// Request the loop to stop after the current cycle. Idempotent.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Snapshot of the risk state, open positions, and performance log.
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            running: self.running.load(Ordering::SeqCst),
            risk: self.state.lock().unwrap().clone(),
            open_positions: self.positions.lock().unwrap().values().cloned().collect(),
            performance: self.recorder.lock().unwrap().summary(),
        }
    }

    /// Run one full cycle: day rollover, position management, then the
    /// symbol scan. Failures are logged and never abort the cycle.
    pub async fn cycle(&self) {
        let now = Utc::now();
        {
            let mut state = self.state.lock().unwrap();
            if state.roll_day(now, &self.risk_config) {
                info!(day = %state.day_key, "daily risk counters reset");
            }
        }

        self.manage_positions().await;
        self.scan(now).await;
    }

    async fn manage_positions(&self) {
        let tracked: Vec<Position> = {
            let positions = self.positions.lock().unwrap();
            positions.values().cloned().collect()
        };

        for position in tracked {
            if let Err(err) = self.manage_position(&position).await {
                warn!(
                    position_id = %position.id,
                    symbol = %position.symbol,
                    error = %err,
                    "position management failed"
                );
            }
        }
    }

    async fn manage_position(&self, position: &Position) -> TradingResult<()> {
        let quote = self.terminal.quote(&position.symbol).await?;
        let spec = self.spec(&position.symbol);

        let Some(action) = self.lifecycle.evaluate(position, &quote, &spec) else {
            return Ok(());
        };

        match action {
            PositionAction::Close { reason } => {
                let request = CloseRequest {
                    position_id: position.id,
                    volume: position.volume,
                };
                let closed = self.terminal.close_position(&request, reason).await?;
                self.settle_close(&closed);
                self.positions.lock().unwrap().remove(&position.id);
                info!(
                    symbol = %closed.symbol,
                    profit = %closed.profit,
                    reason = %closed.reason,
                    "position closed"
                );
            }
            PositionAction::PartialClose { volume } => {
                let request = CloseRequest {
                    position_id: position.id,
                    volume,
                };
                let closed = self
                    .terminal
                    .close_position(&request, CloseReason::Partial)
                    .await?;
                self.settle_close(&closed);
                {
                    let mut positions = self.positions.lock().unwrap();
                    if let Some(open) = positions.get_mut(&position.id) {
                        open.volume -= volume;
                        open.partially_closed = true;
                    }
                }
                info!(
                    symbol = %closed.symbol,
                    volume = %closed.volume,
                    profit = %closed.profit,
                    "position partially closed"
                );
            }
            PositionAction::ModifyStop { new_stop } => {
                let request = ModifyRequest {
                    position_id: position.id,
                    new_stop_loss: new_stop,
                };
                self.terminal.modify_stop(&request).await?;
                {
                    let mut positions = self.positions.lock().unwrap();
                    if let Some(open) = positions.get_mut(&position.id) {
                        open.stop_loss = Some(new_stop);
                    }
                }
                debug!(symbol = %position.symbol, new_stop, "stop adjusted");
            }
        }
        Ok(())
    }

    /// Realized profit feeds the risk state and the performance log
    /// before the position leaves the tracked set.
    fn settle_close(&self, closed: &ClosedTrade) {
        {
            let mut state = self.state.lock().unwrap();
            state.record_close(closed.profit, &self.risk_config);
        }
        self.recorder.lock().unwrap().record(closed.clone());
    }

    async fn scan(&self, now: DateTime<Utc>) {
        for symbol in &self.config.symbols {
            {
                let positions = self.positions.lock().unwrap();
                if positions.values().any(|p| p.symbol == *symbol) {
                    continue;
                }
                if positions.len() >= self.config.max_open_positions {
                    debug!(
                        max = self.config.max_open_positions,
                        "open position cap reached"
                    );
                    break;
                }
            }

            match self.evaluate_symbol(symbol, now).await {
                Ok(_) => {}
                Err(err) if err.is_insufficient_data() => {
                    debug!(symbol, "not enough history yet");
                }
                Err(err) => {
                    warn!(symbol, error = %err, "symbol scan failed");
                }
            }
        }
    }

    async fn evaluate_symbol(
        &self,
        symbol: &str,
        now: DateTime<Utc>,
    ) -> TradingResult<Option<Position>> {
        let candles = self
            .terminal
            .candles(symbol, self.config.timeframe, self.config.candle_count)
            .await?;
        let mut series = CandleSeries::new(symbol, self.config.timeframe);
        series.extend(candles);

        let snapshot = self.indicators.compute(&series)?;
        let signal = self.aggregator.evaluate(&snapshot);
        let Some(side) = signal.direction else {
            debug!(symbol, reason = %signal.reason, "no signal");
            return Ok(None);
        };

        let threshold = {
            let state = self.state.lock().unwrap();
            self.effective_min_confidence(&state)
        };
        if u32::from(signal.confidence) < threshold {
            debug!(
                symbol,
                confidence = signal.confidence,
                threshold,
                "signal below effective threshold"
            );
            return Ok(None);
        }

        info!(
            symbol,
            side = %side,
            confidence = signal.confidence,
            reason = %signal.reason,
            "signal accepted"
        );
        self.try_open(symbol, side, &signal.reason, &snapshot, now)
            .await
    }

    /// Gate, size, and submit one entry. Shared by the scan loop and the
    /// manual-order surface.
    async fn try_open(
        &self,
        symbol: &str,
        side: Side,
        comment: &str,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
    ) -> TradingResult<Option<Position>> {
        let connected = self.terminal.is_connected().await;
        let account = self.terminal.account().await?;
        let quote = self.terminal.quote(symbol).await?;
        let limits = self.terminal.symbol_limits(symbol).await?;
        let spec = self.spec(symbol);

        let ctx = GateContext {
            connected,
            account: &account,
            spread_points: quote.spread_points(limits.point),
            max_spread_override: spec.max_spread_points,
            news_blackout: self.news.in_blackout(now),
            now,
        };
        let decision = {
            let state = self.state.lock().unwrap();
            self.gate.evaluate(&state, &ctx)
        };
        if let Some(reason) = decision.reason() {
            info!(symbol, reason, "trade blocked");
            return Ok(None);
        }

        let entry = match side {
            Side::Buy => quote.ask,
            Side::Sell => quote.bid,
        };
        let (stop_loss, take_profit) = self
            .stop_policy
            .stops(side, entry, snapshot.atr, spec.pip_size);
        let risk_percent = {
            let state = self.state.lock().unwrap();
            state.current_risk_percent
        };
        let volume = self.sizer.size(
            account.balance,
            risk_percent,
            self.stop_policy.stop_distance(snapshot.atr, spec.pip_size),
            spec.contract_value,
            &limits,
        )?;

        if self.config.dry_run {
            info!(
                symbol,
                side = %side,
                volume = %volume,
                stop_loss,
                take_profit,
                comment,
                "dry run, order suppressed"
            );
            return Ok(None);
        }

        let request = OrderRequest::market(symbol, side, volume)
            .with_stops(Some(stop_loss), Some(take_profit))
            .with_comment(comment);
        let position = self.terminal.open_position(&request).await?;

        {
            let mut state = self.state.lock().unwrap();
            state.record_open(now);
        }
        self.positions
            .lock()
            .unwrap()
            .insert(position.id, position.clone());

        info!(
            symbol,
            side = %side,
            volume = %volume,
            entry = position.entry_price,
            stop_loss,
            take_profit,
            "position opened"
        );
        Ok(Some(position))
    }

    /// Open a position on demand, subject to the same gate, sizing, and
    /// risk accounting as the scan loop. Returns `None` when the gate
    /// denies the trade or the engine is in dry-run mode.
    pub async fn submit_manual_order(
        &self,
        symbol: &str,
        side: Side,
    ) -> TradingResult<Option<Position>> {
        let now = Utc::now();
        let candles = self
            .terminal
            .candles(symbol, self.config.timeframe, self.config.candle_count)
            .await?;
        let mut series = CandleSeries::new(symbol, self.config.timeframe);
        series.extend(candles);
        let snapshot = self.indicators.compute(&series)?;

        self.try_open(symbol, side, "manual", &snapshot, now).await
    }

    /// Close a tracked position at market, with the same risk accounting
    /// as an automatic closure.
    pub async fn close_manual(&self, position_id: Uuid) -> TradingResult<ClosedTrade> {
        let position = {
            let positions = self.positions.lock().unwrap();
            positions.get(&position_id).cloned()
        }
        .ok_or_else(|| TerminalError::PositionNotFound(position_id.to_string()))?;

        let request = CloseRequest {
            position_id,
            volume: position.volume,
        };
        let closed = self
            .terminal
            .close_position(&request, CloseReason::Manual)
            .await?;
        self.settle_close(&closed);
        self.positions.lock().unwrap().remove(&position_id);
        info!(
            symbol = %closed.symbol,
            profit = %closed.profit,
            "position closed manually"
        );
        Ok(closed)
    }

    /// Accept threshold for this attempt; stricter while on a losing
    /// streak.
    fn effective_min_confidence(&self, state: &RiskState) -> u32 {
        let mut threshold = self.aggregator.config().min_confidence;
        if state.consecutive_losses > 0 {
            threshold += self.config.loss_confidence_bump;
        }
        threshold
    }

    fn spec(&self, symbol: &str) -> SymbolSpec {
        self.specs.get(symbol).cloned().unwrap_or_default()
    }
}
