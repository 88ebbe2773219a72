//! Weighted multi-strategy signal aggregation.
//!
//! Four strategies each read one indicator [`Snapshot`] and cast
//! weighted votes; the [`SignalAggregator`] tallies them into a single
//! [`Signal`](trader_core::Signal). Everything here is stateless: the
//! same snapshot always produces the same signal.
//!
//! [`Snapshot`]: trader_indicators::Snapshot

pub mod aggregator;
pub mod breakout;
pub mod mean_reversion;
pub mod momentum;
pub mod trend;

pub use aggregator::{AggregatorConfig, SignalAggregator, StrategyToggle};
