//! Configuration structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use trader_core::{SymbolSpec, TradingError};
use trader_engine::EngineConfig;
use trader_indicators::IndicatorConfig;
use trader_risk::{GateConfig, LifecycleConfig, RiskConfig, StaticNewsWindows, StopPolicy};
use trader_signals::AggregatorConfig;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    #[serde(default)]
    pub strategy: AggregatorConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub stops: StopPolicy,
    #[serde(default)]
    pub news: StaticNewsWindows,
    /// Per-symbol metadata; defaults to the built-in instrument table.
    #[serde(default = "SymbolSpec::builtin")]
    pub symbols: HashMap<String, SymbolSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            engine: EngineConfig::default(),
            indicators: IndicatorConfig::default(),
            strategy: AggregatorConfig::default(),
            risk: RiskConfig::default(),
            gate: GateConfig::default(),
            lifecycle: LifecycleConfig::default(),
            stops: StopPolicy::default(),
            news: StaticNewsWindows::default(),
            symbols: SymbolSpec::builtin(),
        }
    }
}

impl AppConfig {
    /// Validates every section and the wiring between them. Any failure
    /// here is fatal at startup.
    pub fn validate(&self) -> Result<(), TradingError> {
        self.logging.validate()?;
        self.engine.validate()?;
        self.indicators.validate()?;
        self.strategy.validate()?;
        self.risk.validate()?;
        self.gate.validate()?;
        self.lifecycle.validate()?;
        self.validate_stops()?;
        self.validate_news()?;
        self.validate_symbols()?;

        if self.engine.candle_count < self.indicators.min_candles {
            return Err(TradingError::Config(format!(
                "candle_count {} is below the {} bars the indicator set needs",
                self.engine.candle_count, self.indicators.min_candles
            )));
        }

        // Mean reversion casts separate RSI and band votes, so its
        // weight can count twice toward one side.
        let s = &self.strategy;
        let mut reachable = 0u32;
        if s.trend.enabled {
            reachable += s.trend.weight;
        }
        if s.mean_reversion.enabled {
            reachable += 2 * s.mean_reversion.weight;
        }
        if s.momentum.enabled {
            reachable += s.momentum.weight;
        }
        if s.breakout.enabled {
            reachable += s.breakout.weight;
        }
        if reachable < s.min_confidence {
            return Err(TradingError::Config(format!(
                "enabled strategy weights reach at most {} of the {} confidence threshold",
                reachable, s.min_confidence
            )));
        }

        Ok(())
    }

    fn validate_stops(&self) -> Result<(), TradingError> {
        match self.stops {
            StopPolicy::FixedPips { sl_pips, tp_pips } => {
                if sl_pips <= 0.0 || tp_pips <= 0.0 {
                    return Err(TradingError::Validation(
                        "stop distances must be positive".to_string(),
                    ));
                }
            }
            StopPolicy::AtrMultiple {
                sl_multiplier,
                tp_multiplier,
            } => {
                if sl_multiplier <= 0.0 || tp_multiplier <= 0.0 {
                    return Err(TradingError::Validation(
                        "stop multipliers must be positive".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn validate_news(&self) -> Result<(), TradingError> {
        if self.news.friday_cutoff_hour > 23 || self.news.monday_open_hour > 23 {
            return Err(TradingError::Validation(
                "news window hours must lie within 0-23".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_symbols(&self) -> Result<(), TradingError> {
        if self.symbols.is_empty() {
            return Err(TradingError::Validation(
                "symbol metadata table must not be empty".to_string(),
            ));
        }
        for (symbol, spec) in &self.symbols {
            if spec.pip_size <= 0.0 || spec.contract_value <= 0.0 {
                return Err(TradingError::Validation(format!(
                    "symbol {symbol} has a non-positive pip size or contract value"
                )));
            }
        }
        for symbol in &self.engine.symbols {
            if !self.symbols.contains_key(symbol) {
                return Err(TradingError::Config(format!(
                    "no symbol metadata for {symbol}"
                )));
            }
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trader".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Output format, `pretty` or `json`.
    pub format: String,
    /// Directory for daily-rolled log files; stderr only when unset.
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), TradingError> {
        if self.format != "pretty" && self.format != "json" {
            return Err(TradingError::Validation(
                "logging format must be 'pretty' or 'json'".to_string(),
            ));
        }
        Ok(())
    }
}
