//! Calendar date type.

use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A calendar date.
///
/// Thin newtype over [`chrono::NaiveDate`] exposing the arithmetic that
/// schedules and curves need. Serializes as an ISO-8601 date string.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Date;
///
/// let d = Date::from_ymd(2025, 8, 22).unwrap();
/// assert_eq!(d.add_months(6).unwrap(), Date::from_ymd(2026, 2, 22).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns an error if the combination is not a valid calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CoreError::invalid_date(year, month, day))
    }

    /// Parses an ISO-8601 date string (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid ISO date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CoreError::date_parse(s))
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of month (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the number of days in this date's month.
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if self.is_leap_year() {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// Returns the number of days in this date's year.
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Returns true if this date's year is a leap year.
    pub fn is_leap_year(&self) -> bool {
        let y = self.year();
        (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0)
    }

    /// Returns true if this date is the last day of its month.
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Adds a number of calendar days (may be negative).
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Adds a number of calendar months, clamping to the end of month.
    ///
    /// E.g. Jan 31 + 1 month = Feb 28/29.
    ///
    /// # Errors
    ///
    /// Returns an error if the result leaves the representable date range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.map(Self).ok_or_else(|| {
            CoreError::date_out_of_range(format!("{self} + {months} months"))
        })
    }

    /// Adds a number of calendar years, clamping to the end of month.
    ///
    /// # Errors
    ///
    /// Returns an error if the result leaves the representable date range.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        self.add_months(years * 12)
    }

    /// Returns the signed number of days from this date to `other`.
    pub fn days_between(&self, other: &Date) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Returns the underlying [`chrono::NaiveDate`].
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd_valid() {
        let d = Date::from_ymd(2025, 8, 22).unwrap();
        assert_eq!(d.year(), 2025);
        assert_eq!(d.month(), 8);
        assert_eq!(d.day(), 22);
    }

    #[test]
    fn test_from_ymd_invalid() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_parse_iso() {
        let d = Date::parse("2025-08-22").unwrap();
        assert_eq!(d, Date::from_ymd(2025, 8, 22).unwrap());
        assert!(Date::parse("22/08/2025").is_err());
    }

    #[test]
    fn test_add_months_eom_clamp() {
        let d = Date::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(d.add_months(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
        let leap = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(
            leap.add_months(1).unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_add_months_negative() {
        let d = Date::from_ymd(2025, 3, 15).unwrap();
        assert_eq!(d.add_months(-2).unwrap(), Date::from_ymd(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_days_between() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2026, 1, 1).unwrap();
        assert_eq!(a.days_between(&b), 365);
        assert_eq!(b.days_between(&a), -365);
    }

    #[test]
    fn test_end_of_month() {
        assert!(Date::from_ymd(2025, 2, 28).unwrap().is_end_of_month());
        assert!(!Date::from_ymd(2024, 2, 28).unwrap().is_end_of_month());
        assert!(Date::from_ymd(2024, 2, 29).unwrap().is_end_of_month());
    }

    #[test]
    fn test_serde_roundtrip() {
        let d = Date::from_ymd(2025, 8, 22).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2025-08-22\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
