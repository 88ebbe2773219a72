//! The autonomous trading engine.
//!
//! [`TradingEngine`] wires the decision core (indicators, signal
//! aggregation, risk gate, sizer, lifecycle) to a broker terminal and
//! runs the cooperative scan loop. Share it behind an [`std::sync::Arc`]
//! to drive the loop from one task while reading [`TradingEngine::status`]
//! or calling the manual-order surface from another.

mod engine;

pub use engine::{EngineConfig, EngineStatus, TradingEngine};
