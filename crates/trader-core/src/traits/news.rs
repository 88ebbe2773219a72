//! News blackout predicate.

use chrono::{DateTime, Utc};

/// Boolean gate over news blackout windows.
///
/// Calendar ingestion is out of scope; implementations answer a single
/// question per gate evaluation. The risk gate denies trading while this
/// returns true.
pub trait NewsCalendar: Send + Sync {
    /// True when trading should pause for a news window at `now`.
    fn in_blackout(&self, now: DateTime<Utc>) -> bool;
}

/// Calendar that never blocks. Useful for tests and simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNews;

impl NewsCalendar for NoNews {
    fn in_blackout(&self, _now: DateTime<Utc>) -> bool {
        false
    }
}
