//! Terminal implementations.
//!
//! [`SimTerminal`] is an in-memory implementation of
//! [`trader_core::Terminal`] driven by scripted candles and quotes,
//! used by the engine's dry-run mode and the test suites.
//! [`SyntheticFeed`] scripts a deterministic market on top of it for
//! demo runs.

pub mod demo;
pub mod sim;

pub use demo::{demo_limits, SyntheticFeed};
pub use sim::SimTerminal;
