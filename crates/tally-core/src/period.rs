//! # Report Periods
//!
//! Inclusive calendar-date ranges and the UTC windows they cover.
//!
//! ## Boundary Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User picks:   2024-03-01 ... 2024-03-31   (calendar dates)             │
//! │                     │              │                                    │
//! │                     ▼              ▼                                    │
//! │  Local time:   00:00:00.000   23:59:59.999                              │
//! │                     │              │                                    │
//! │                     ▼              ▼   (minus the UTC offset)            │
//! │  UTC window:   [start ........... end]   both ends inclusive            │
//! │                                                                         │
//! │  Missing start → unbounded below.  Missing end → unbounded above.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// An inclusive range of calendar dates. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[ts(as = "Option<String>")]
    pub start: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range that includes every record.
    pub const fn all() -> Self {
        DateRange {
            start: None,
            end: None,
        }
    }

    /// Both bounds, without checking their order.
    ///
    /// An inverted range is legal and simply matches nothing.
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both bounds, rejecting `start > end`.
    pub fn checked(start: Option<NaiveDate>, end: Option<NaiveDate>) -> CoreResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(CoreError::InvalidDateRange {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
        }
        Ok(DateRange { start, end })
    }

    /// A single calendar day.
    pub const fn day(date: NaiveDate) -> Self {
        DateRange::between(date, date)
    }

    /// True when neither bound is set.
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Resolves the calendar dates into a UTC window for a local offset.
    pub fn window(&self, offset: FixedOffset) -> DateWindow {
        DateWindow {
            start: self.start.map(|d| local_to_utc(start_of_day(d), offset)),
            end: self.end.map(|d| local_to_utc(end_of_day(d), offset)),
        }
    }

    /// Shorthand for `self.window(offset).contains(at)`.
    pub fn contains(&self, at: DateTime<Utc>, offset: FixedOffset) -> bool {
        self.window(offset).contains(at)
    }
}

/// A resolved, inclusive UTC window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| at >= s) && self.end.map_or(true, |e| at <= e)
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

fn local_to_utc(local: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    (local - TimeDelta::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_unbounded_includes_everything() {
        let range = DateRange::all();
        assert!(range.is_unbounded());
        assert!(range.contains(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap(), utc()));
        assert!(range.contains(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap(), utc()));
    }

    #[test]
    fn test_end_boundary_is_inclusive_to_the_millisecond() {
        let range = DateRange::between(date(2024, 3, 1), date(2024, 3, 31));
        let last_ms = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()
            + TimeDelta::milliseconds(999);

        assert!(range.contains(last_ms, utc()));
        assert!(!range.contains(last_ms + TimeDelta::milliseconds(1), utc()));
    }

    #[test]
    fn test_start_boundary_is_inclusive() {
        let range = DateRange::between(date(2024, 3, 1), date(2024, 3, 31));
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        assert!(range.contains(first, utc()));
        assert!(!range.contains(first - TimeDelta::milliseconds(1), utc()));
    }

    #[test]
    fn test_window_honours_local_offset() {
        // UTC+05:00: local midnight on March 1st is 19:00 UTC on Feb 29th.
        let plus_five = FixedOffset::east_opt(5 * 3600).unwrap();
        let range = DateRange::day(date(2024, 3, 1));
        let window = range.window(plus_five);

        assert_eq!(
            window.start,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 19, 0, 0).unwrap())
        );
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 2, 29, 20, 0, 0).unwrap(), plus_five));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap(), plus_five));
    }

    #[test]
    fn test_open_ended_ranges() {
        let from = DateRange {
            start: Some(date(2024, 1, 1)),
            end: None,
        };
        assert!(from.contains(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(), utc()));
        assert!(!from.contains(Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap(), utc()));
    }

    #[test]
    fn test_checked_rejects_inverted_range() {
        assert!(DateRange::checked(Some(date(2024, 2, 1)), Some(date(2024, 1, 1))).is_err());
        assert!(DateRange::checked(Some(date(2024, 1, 1)), None).is_ok());
    }
}
