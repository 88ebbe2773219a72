//! Core traits for the trading engine.

mod indicator;
mod news;
mod terminal;

pub use indicator::{Indicator, MultiOutputIndicator};
pub use news::{NewsCalendar, NoNews};
pub use terminal::{AccountInfo, Quote, SymbolLimits, Terminal};
