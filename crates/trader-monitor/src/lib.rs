//! Logging setup and trade performance tracking.

mod logging;
mod performance;

pub use logging::setup_logging;
pub use performance::{PerformanceSummary, TradeRecorder};
pub use tracing_appender::non_blocking::WorkerGuard;
