//! Core types and traits for the trading engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Candle, CandleSeries)
//! - Order, position, and signal types
//! - Per-instrument metadata (SymbolSpec)
//! - Traits for the broker terminal, news calendar, and indicators

pub mod error;
pub mod traits;
pub mod types;

pub use error::{IndicatorError, RiskError, TerminalError, TradingError, TradingResult};
pub use traits::*;
pub use types::*;
