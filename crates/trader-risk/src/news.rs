//! Static news-blackout windows.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trader_core::NewsCalendar;

/// Fixed weekly blackout windows around the weekend rollover, when
/// liquidity is thin and gaps are common.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticNewsWindows {
    pub avoid_friday_evening: bool,
    pub avoid_monday_morning: bool,
    /// Hour (UTC) from which Friday trading stops.
    pub friday_cutoff_hour: u32,
    /// Hour (UTC) before which Monday trading is blocked.
    pub monday_open_hour: u32,
}

impl Default for StaticNewsWindows {
    fn default() -> Self {
        Self {
            avoid_friday_evening: true,
            avoid_monday_morning: true,
            friday_cutoff_hour: 16,
            monday_open_hour: 8,
        }
    }
}

impl NewsCalendar for StaticNewsWindows {
    fn in_blackout(&self, now: DateTime<Utc>) -> bool {
        match now.weekday() {
            Weekday::Fri => self.avoid_friday_evening && now.hour() >= self.friday_cutoff_hour,
            Weekday::Mon => self.avoid_monday_morning && now.hour() < self.monday_open_hour,
            _ => false,
        }
    }
}

/// Union of blackout sources. Any engaged source blocks trading, so the
/// static windows can be stacked with an externally fed calendar.
#[derive(Clone, Default)]
pub struct CombinedCalendar {
    sources: Vec<Arc<dyn NewsCalendar>>,
}

impl CombinedCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: Arc<dyn NewsCalendar>) -> Self {
        self.sources.push(source);
        self
    }
}

impl NewsCalendar for CombinedCalendar {
    fn in_blackout(&self, now: DateTime<Utc>) -> bool {
        self.sources.iter().any(|source| source.in_blackout(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_friday_evening_blackout() {
        let windows = StaticNewsWindows::default();

        // Friday 2024-03-08.
        let afternoon = Utc.with_ymd_and_hms(2024, 3, 8, 15, 59, 0).unwrap();
        assert!(!windows.in_blackout(afternoon));

        let evening = Utc.with_ymd_and_hms(2024, 3, 8, 16, 0, 0).unwrap();
        assert!(windows.in_blackout(evening));
    }

    #[test]
    fn test_monday_morning_blackout() {
        let windows = StaticNewsWindows::default();

        // Monday 2024-03-11.
        let early = Utc.with_ymd_and_hms(2024, 3, 11, 7, 59, 0).unwrap();
        assert!(windows.in_blackout(early));

        let open = Utc.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap();
        assert!(!windows.in_blackout(open));
    }

    #[test]
    fn test_midweek_is_clear() {
        let windows = StaticNewsWindows::default();

        let wednesday = Utc.with_ymd_and_hms(2024, 3, 6, 16, 30, 0).unwrap();
        assert!(!windows.in_blackout(wednesday));
    }

    #[test]
    fn test_windows_can_be_disabled() {
        let windows = StaticNewsWindows {
            avoid_friday_evening: false,
            ..StaticNewsWindows::default()
        };

        let evening = Utc.with_ymd_and_hms(2024, 3, 8, 18, 0, 0).unwrap();
        assert!(!windows.in_blackout(evening));
    }

    struct AlwaysOn;

    impl NewsCalendar for AlwaysOn {
        fn in_blackout(&self, _now: DateTime<Utc>) -> bool {
            true
        }
    }

    #[test]
    fn test_combined_calendar_unions_sources() {
        let empty = CombinedCalendar::new();
        let wednesday = Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap();
        assert!(!empty.in_blackout(wednesday));

        let combined = CombinedCalendar::new()
            .with(Arc::new(StaticNewsWindows::default()))
            .with(Arc::new(AlwaysOn));
        assert!(combined.in_blackout(wednesday));

        let windows_only = CombinedCalendar::new().with(Arc::new(StaticNewsWindows::default()));
        assert!(!windows_only.in_blackout(wednesday));
        let friday_evening = Utc.with_ymd_and_hms(2024, 3, 8, 17, 0, 0).unwrap();
        assert!(windows_only.in_blackout(friday_evening));
    }
}
