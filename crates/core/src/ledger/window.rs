//! Date windows for ledger queries.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::error::LedgerError;

/// An inclusive, date-granular window. Either bound may be open.
///
/// Timestamps are compared by their calendar date in the business timezone,
/// so `to` covers the whole of its day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidDateRange` if `from` is after `to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, LedgerError> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(LedgerError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// The unbounded window (entire history).
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// First included date.
    #[must_use]
    pub const fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    /// Last included date.
    #[must_use]
    pub const fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    /// Returns true if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Returns true if the date lies within the window.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Returns true if the instant falls on a business day within the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>, tz: Tz) -> bool {
        self.contains_date(at.with_timezone(&tz).date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateWindow::new(Some(date(2025, 2, 1)), Some(date(2025, 1, 1))).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
    }

    #[test]
    fn test_single_day_window() {
        let window = DateWindow::new(Some(date(2025, 1, 1)), Some(date(2025, 1, 1))).unwrap();
        assert!(window.contains_date(date(2025, 1, 1)));
        assert!(!window.contains_date(date(2025, 1, 2)));
    }

    #[test]
    fn test_to_is_end_of_day() {
        let window = DateWindow::new(None, Some(date(2025, 1, 31))).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

        assert!(window.contains(late, chrono_tz::UTC));
        assert!(!window.contains(next, chrono_tz::UTC));
    }

    #[test]
    fn test_business_timezone_shifts_the_day() {
        // 22:30 UTC on Jan 31 is already Feb 1 in Cairo (UTC+2).
        let window = DateWindow::new(Some(date(2025, 2, 1)), None).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 22, 30, 0).unwrap();

        assert!(!window.contains(at, chrono_tz::UTC));
        assert!(window.contains(at, chrono_tz::Africa::Cairo));
    }

    #[test]
    fn test_unbounded_contains_everything() {
        let window = DateWindow::all();
        assert!(window.is_unbounded());
        assert!(window.contains_date(NaiveDate::MIN));
        assert!(window.contains_date(NaiveDate::MAX));
    }
}
