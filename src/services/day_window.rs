//! Calendar-day handling in UTC.
//!
//! A day is looked up through the closed interval
//! `[D 00:00:00.000Z, D 23:59:59.999Z]` and stored at `D 12:00:00.000Z`.
//! Noon sits twelve hours from either boundary, so no realistic client
//! offset moves a stored record onto a neighbouring day. Nothing here reads
//! the server's local timezone.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn for_day(day: NaiveDate) -> Self {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        Self { day, start, end }
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(date: &str) -> AppResult<Self> {
        parse_day(date).map(Self::for_day)
    }

    /// The instant a record for this day is written at.
    pub fn canonical(&self) -> DateTime<Utc> {
        self.start + Duration::hours(12)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Optional inclusive bounds for range listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl RecordRange {
    /// Bounds may be `YYYY-MM-DD` (whole days, inclusive) or RFC 3339 instants.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> AppResult<Self> {
        let start = start
            .filter(|s| !s.is_empty())
            .map(|s| parse_bound(s, |w| w.start))
            .transpose()?;
        let end = end
            .filter(|s| !s.is_empty())
            .map(|s| parse_bound(s, |w| w.end))
            .transpose()?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| s <= instant) && self.end.map_or(true, |e| instant <= e)
    }
}

fn parse_day(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("Invalid date '{date}', expected YYYY-MM-DD")))
}

fn parse_bound(raw: &str, pick: fn(&DayWindow) -> DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Ok(instant.with_timezone(&Utc));
    }
    parse_day(raw).map(|day| pick(&DayWindow::for_day(day)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_window_bounds_are_exact() {
        let window = DayWindow::parse("2024-03-15").unwrap();
        assert_eq!(window.start, utc("2024-03-15T00:00:00.000Z"));
        assert_eq!(window.end, utc("2024-03-15T23:59:59.999Z"));
    }

    #[test]
    fn test_canonical_is_noon_utc() {
        let window = DayWindow::parse("2024-03-15").unwrap();
        assert_eq!(window.canonical(), utc("2024-03-15T12:00:00.000Z"));
        assert!(window.contains(window.canonical()));
    }

    #[test]
    fn test_window_across_month_and_leap_day() {
        let window = DayWindow::parse("2024-02-29").unwrap();
        assert_eq!(window.end, utc("2024-02-29T23:59:59.999Z"));
        assert!(!window.contains(utc("2024-03-01T00:00:00.000Z")));
    }

    #[test]
    fn test_contains_is_closed_interval() {
        let window = DayWindow::parse("2024-03-15").unwrap();
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::milliseconds(1)));
        assert!(!window.contains(window.end + Duration::milliseconds(1)));
    }

    #[test]
    fn test_malformed_dates_rejected() {
        for bad in ["", "15/03/2024", "2024-13-01", "2024-02-30", "yesterday"] {
            assert!(
                matches!(DayWindow::parse(bad), Err(AppError::Validation(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_range_day_bounds_cover_whole_days() {
        let range = RecordRange::parse(Some("2024-03-01"), Some("2024-03-31")).unwrap();
        assert_eq!(range.start, Some(utc("2024-03-01T00:00:00.000Z")));
        assert_eq!(range.end, Some(utc("2024-03-31T23:59:59.999Z")));
        assert!(range.contains(utc("2024-03-31T12:00:00Z")));
        assert!(!range.contains(utc("2024-04-01T12:00:00Z")));
    }

    #[test]
    fn test_range_accepts_rfc3339_and_open_ends() {
        let range = RecordRange::parse(Some("2024-03-01T06:00:00+02:00"), None).unwrap();
        assert_eq!(range.start, Some(utc("2024-03-01T04:00:00Z")));
        assert_eq!(range.end, None);
        assert!(range.contains(utc("2099-01-01T00:00:00Z")));
    }

    #[test]
    fn test_range_empty_strings_are_unbounded() {
        assert_eq!(RecordRange::parse(Some(""), Some("")).unwrap(), RecordRange::default());
    }

    #[test]
    fn test_range_rejects_garbage() {
        assert!(RecordRange::parse(Some("soon"), None).is_err());
    }
}
