//! Risk management for the trading engine.
//!
//! Four pieces cooperate around one shared [`RiskState`] ledger:
//!
//! - [`RiskState`] tracks the daily counters, streaks and the adaptive
//!   risk percentage, mutated only by trade open/close events and the
//!   day rollover.
//! - [`RiskGate`] runs the ordered pre-trade checks; every check is a
//!   pure read and the first denial wins.
//! - [`PositionSizer`] turns balance, risk percent and stop distance
//!   into a lot size inside symbol limits.
//! - [`LifecycleManager`] walks each open position through take-profit,
//!   stop-loss, trailing-stop and partial-close transitions.

pub mod gate;
pub mod lifecycle;
pub mod news;
pub mod sizer;
pub mod state;
pub mod stops;

pub use gate::{GateConfig, GateContext, GateDecision, RiskGate};
pub use lifecycle::{LifecycleConfig, LifecycleManager, PositionAction};
pub use news::{CombinedCalendar, StaticNewsWindows};
pub use sizer::PositionSizer;
pub use state::{RiskConfig, RiskState};
pub use stops::StopPolicy;
