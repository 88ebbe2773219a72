//! Core data types for the trading engine.

mod candle;
mod order;
mod position;
mod signal;
mod symbol;
mod timeframe;

pub use candle::{Candle, CandleSeries};
pub use order::{CloseRequest, ModifyRequest, OrderRequest, Side};
pub use position::{CloseReason, ClosedTrade, Position};
pub use signal::{Signal, Vote};
pub use symbol::SymbolSpec;
pub use timeframe::Timeframe;
