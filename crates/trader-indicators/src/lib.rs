//! Technical indicators and the per-cycle snapshot engine.
//!
//! Single-output indicators implement [`trader_core::Indicator`],
//! multi-output ones implement [`trader_core::MultiOutputIndicator`].
//! [`IndicatorEngine`] runs the full set over a candle window and
//! condenses the latest values into a [`Snapshot`] for the strategy
//! layer.

pub mod moving_average;
pub mod momentum;
pub mod snapshot;
pub mod supertrend;
pub mod volatility;

pub use moving_average::{Ema, Sma};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use snapshot::{IndicatorConfig, IndicatorEngine, Snapshot};
pub use supertrend::{SuperTrend, SuperTrendPoint, TrendDirection};
pub use volatility::{Atr, BollingerBands, BollingerOutput, StdDev};
