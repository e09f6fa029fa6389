//! Calendar windows used for counting realized appointments.
//!
//! All windows are computed in UTC.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::types::Timestamp;

/// Default look-back for the performance action sync, in days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// A half-open `[start, end)` range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    pub fn contains(&self, at: Timestamp) -> bool {
        at >= self.start && at < self.end
    }
}

fn midnight(date: NaiveDate) -> Timestamp {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// The calendar day `date`, midnight to midnight.
pub fn day_of(date: NaiveDate) -> TimeWindow {
    let start = midnight(date);
    TimeWindow {
        start,
        end: start + Duration::days(1),
    }
}

/// The calendar day containing `now`.
pub fn today(now: Timestamp) -> TimeWindow {
    day_of(now.date_naive())
}

/// Month-to-date: from the 1st of the month containing `now` through the
/// end of `now`'s day, so the current day is always inside it.
pub fn month_to_date(now: Timestamp) -> TimeWindow {
    let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
    TimeWindow {
        start: midnight(first),
        end: today(now).end,
    }
}

/// Default `[start, end]` date range for the action sync: the last
/// `lookback_days` days up to and including `today`.
pub fn lookback_period(today: NaiveDate, lookback_days: i64) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(lookback_days), today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Timestamp {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn today_spans_one_day() {
        let w = today(at("2024-03-15T14:30:00Z"));
        assert_eq!(w.start, at("2024-03-15T00:00:00Z"));
        assert_eq!(w.end, at("2024-03-16T00:00:00Z"));
        assert!(w.contains(at("2024-03-15T23:59:59Z")));
        assert!(!w.contains(at("2024-03-16T00:00:00Z")));
    }

    #[test]
    fn month_to_date_starts_on_the_first() {
        let now = at("2024-03-15T14:30:00Z");
        let w = month_to_date(now);
        assert_eq!(w.start, at("2024-03-01T00:00:00Z"));
        assert_eq!(w.end, at("2024-03-16T00:00:00Z"));
        assert!(w.contains(at("2024-03-15T18:00:00Z")));
    }

    #[test]
    fn lookback_default_is_thirty_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = lookback_period(today, DEFAULT_LOOKBACK_DAYS);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(end, today);
    }
}
