//! The snapshot engine: one pass over a candle window, one condensed
//! view of every indicator's latest value.

use serde::{Deserialize, Serialize};
use trader_core::{CandleSeries, IndicatorError, TradingResult};
use trader_core::{Indicator, MultiOutputIndicator};

use crate::moving_average::{Ema, Sma};
use crate::momentum::{Macd, Rsi};
use crate::supertrend::{SuperTrend, TrendDirection};
use crate::volatility::{Atr, BollingerBands};

/// Periods and spans for the full indicator set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Minimum candles required before any snapshot is produced.
    pub min_candles: usize,
    pub atr_period: usize,
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub rsi_period: usize,
    pub ema_fast_span: usize,
    pub ema_slow_span: usize,
    pub ema_trend_span: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub volume_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            min_candles: 50,
            atr_period: 14,
            supertrend_period: 10,
            supertrend_multiplier: 3.0,
            rsi_period: 14,
            ema_fast_span: 9,
            ema_slow_span: 21,
            ema_trend_span: 50,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            volume_period: 20,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.atr_period == 0
            || self.supertrend_period == 0
            || self.rsi_period == 0
            || self.ema_fast_span == 0
            || self.ema_slow_span == 0
            || self.ema_trend_span == 0
            || self.macd_fast == 0
            || self.macd_slow == 0
            || self.macd_signal == 0
            || self.volume_period == 0
        {
            return Err(IndicatorError::InvalidParameter(
                "indicator periods must be greater than 0".to_string(),
            ));
        }
        if self.bollinger_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "Bollinger period must be at least 2".to_string(),
            ));
        }
        if self.bollinger_std_dev <= 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "Bollinger multiplier must be positive".to_string(),
            ));
        }
        if self.supertrend_multiplier <= 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "SuperTrend multiplier must be positive".to_string(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(
                "MACD fast period must be shorter than slow period".to_string(),
            ));
        }

        let required = (self.rsi_period + 1)
            .max(self.atr_period + 1)
            .max(self.supertrend_period + 1)
            .max(self.macd_slow)
            .max(self.bollinger_period)
            .max(self.volume_period);
        if self.min_candles < required {
            return Err(IndicatorError::InvalidParameter(format!(
                "min_candles {} is below the {} bars the indicator set needs",
                self.min_candles, required
            )));
        }

        Ok(())
    }
}

/// Latest value of every indicator over one candle window.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub symbol: String,
    pub timestamp: i64,
    pub trend_value: f64,
    pub trend_direction: TrendDirection,
    pub atr: f64,
    pub rsi: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub ema_trend: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub volume_ma: f64,
    pub current_volume: f64,
    pub current_price: f64,
    pub session_high: f64,
    pub session_low: f64,
}

/// Runs the indicator set over a candle window.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Computes a [`Snapshot`] from the series, or
    /// [`IndicatorError::InsufficientData`] when the window is shorter
    /// than `min_candles`.
    pub fn compute(&self, series: &CandleSeries) -> TradingResult<Snapshot> {
        let available = series.len();
        if available < self.config.min_candles {
            return Err(IndicatorError::InsufficientData {
                required: self.config.min_candles,
                available,
            }
            .into());
        }

        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let volumes = series.volumes();

        let supertrend = SuperTrend::new(
            self.config.supertrend_period,
            self.config.supertrend_multiplier,
        )
        .calculate_ohlc(&highs, &lows, &closes);
        let trend = self.latest(&supertrend, available)?;

        let atr = self.latest(
            &Atr::new(self.config.atr_period).calculate_ohlc(&highs, &lows, &closes),
            available,
        )?;
        let rsi = self.latest(&Rsi::new(self.config.rsi_period).calculate(&closes), available)?;
        let ema_fast = self.latest(
            &Ema::new(self.config.ema_fast_span).calculate(&closes),
            available,
        )?;
        let ema_slow = self.latest(
            &Ema::new(self.config.ema_slow_span).calculate(&closes),
            available,
        )?;
        let ema_trend = self.latest(
            &Ema::new(self.config.ema_trend_span).calculate(&closes),
            available,
        )?;
        let macd = self.latest(
            &Macd::new(
                self.config.macd_fast,
                self.config.macd_slow,
                self.config.macd_signal,
            )
            .calculate(&closes),
            available,
        )?;
        let bollinger = self.latest(
            &BollingerBands::new(self.config.bollinger_period, self.config.bollinger_std_dev)
                .calculate(&closes),
            available,
        )?;
        let volume_ma = self.latest(
            &Sma::new(self.config.volume_period).calculate(&volumes),
            available,
        )?;

        let last = series.last().ok_or(IndicatorError::InsufficientData {
            required: self.config.min_candles,
            available,
        })?;
        let session_high = series.session_high().unwrap_or(last.high);
        let session_low = series.session_low().unwrap_or(last.low);

        Ok(Snapshot {
            symbol: series.symbol.clone(),
            timestamp: last.timestamp,
            trend_value: trend.value,
            trend_direction: trend.direction,
            atr,
            rsi,
            ema_fast,
            ema_slow,
            ema_trend,
            macd: macd.macd,
            macd_signal: macd.signal,
            bb_upper: bollinger.upper,
            bb_lower: bollinger.lower,
            volume_ma,
            current_volume: last.volume,
            current_price: last.close,
            session_high,
            session_low,
        })
    }

    fn latest<T: Copy>(&self, values: &[T], available: usize) -> Result<T, IndicatorError> {
        values.last().copied().ok_or(IndicatorError::InsufficientData {
            required: self.config.min_candles,
            available,
        })
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            config: IndicatorConfig::default(),
        }
    }
}
