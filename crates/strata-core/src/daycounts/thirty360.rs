//! 30/360 US (Bond Basis) day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

/// 30/360 US (Bond Basis).
///
/// Assumes 30-day months and a 360-day year, with the US end-of-month
/// adjustments. Used for US corporate, agency and municipal bonds.
///
/// Adjustment rules:
/// 1. If D1 is the last day of February, D1 becomes 30.
/// 2. Otherwise if D1 is 31, D1 becomes 30.
/// 3. If D2 is the last day of February and rule 1 applied, D2 becomes 30.
/// 4. Otherwise if D2 is 31 and D1 >= 30, D2 becomes 30.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let (y1, m1) = (i64::from(start.year()), i64::from(start.month()));
        let (y2, m2) = (i64::from(end.year()), i64::from(end.month()));
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        let start_is_feb_eom = is_last_day_of_february(start);
        if start_is_feb_eom || d1 == 31 {
            d1 = 30;
        }
        if is_last_day_of_february(end) && start_is_feb_eom {
            d2 = 30;
        } else if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}
