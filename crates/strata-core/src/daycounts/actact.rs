//! Actual/Actual ISDA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA.
///
/// Splits the period year by year; days falling in a leap year accrue
/// over 366, days in a common year over 365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start == end {
            return Decimal::ZERO;
        }
        if start > end {
            return -self.year_fraction(end, start);
        }

        let mut total = Decimal::ZERO;
        let mut current = start;

        while current.year() < end.year() {
            // Jan 1 of the next year; from_ymd only fails at the range limits
            let next_jan = match Date::from_ymd(current.year() + 1, 1, 1) {
                Ok(d) => d,
                Err(_) => break,
            };
            let days = current.days_between(&next_jan);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
            current = next_jan;
        }

        if current < end {
            let days = current.days_between(&end);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
        }

        total
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_common_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();
        assert_eq!(dc.year_fraction(start, end), dec!(1));
    }

    #[test]
    fn test_full_leap_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        // 366 / 366 = 1
        assert_eq!(dc.year_fraction(start, end), dec!(1));
    }

    #[test]
    fn test_split_across_leap_boundary() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2023, 7, 1).unwrap();
        let end = Date::from_ymd(2024, 7, 1).unwrap();
        // 184 days in 2023 over 365, 182 days in 2024 over 366
        let expected = dec!(184) / dec!(365) + dec!(182) / dec!(366);
        assert_eq!(dc.year_fraction(start, end), expected);
    }

    #[test]
    fn test_negative_period() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2025, 7, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert!(dc.year_fraction(start, end) < dec!(0));
    }
}
