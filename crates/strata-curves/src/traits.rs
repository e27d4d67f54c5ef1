//! The core curve trait.

use serde_json::Value;

use strata_core::daycounts::DayCount;
use strata_core::types::{Compounding, Date};

use crate::error::{CurveError, CurveResult};

/// The query contract shared by every curve type.
///
/// A curve is a pure function of its constructed state: it maps a time
/// horizon `t` (in years from its [`curve_date`](Curve::curve_date)) to a
/// rate and a discount factor, and maps dates onto the time axis through
/// its owned day count convention. Curves are immutable once built, so
/// shared references can be queried from any thread.
///
/// # Required methods
///
/// - [`curve_date`](Curve::curve_date), [`day_count`](Curve::day_count):
///   the valuation pivot and the date-to-time mapping
/// - [`get_rate`](Curve::get_rate): the rate at a horizon
/// - [`type_tag`](Curve::type_tag), [`as_dict`](Curve::as_dict): the
///   serialization surface used by [`curve_from_dict`](crate::serialize::curve_from_dict)
///
/// # Provided methods
///
/// - [`discount_t`](Curve::discount_t): discount factor from the rate under
///   the curve's compounding convention
/// - [`date_rate`](Curve::date_rate): rate at a date
/// - [`year_fraction`](Curve::year_fraction): date → time axis
pub trait Curve: Send + Sync {
    /// The curve's valuation date. All horizons are measured from here.
    fn curve_date(&self) -> Date;

    /// The day count convention mapping dates to year fractions.
    fn day_count(&self) -> &dyn DayCount;

    /// The compounding convention of the curve's rates.
    fn compounding(&self) -> Compounding {
        Compounding::Annual
    }

    /// Returns the rate at horizon `t` (years, `t >= 0`).
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite `t`.
    fn get_rate(&self, t: f64) -> CurveResult<f64>;

    /// Returns the discount factor at horizon `t`.
    ///
    /// Derived from [`get_rate`](Curve::get_rate) under the curve's
    /// compounding convention; 1.0 at `t = 0`.
    ///
    /// # Errors
    ///
    /// Propagates [`get_rate`](Curve::get_rate) errors.
    fn discount_t(&self, t: f64) -> CurveResult<f64> {
        let rate = self.get_rate(t)?;
        Ok(self.compounding().discount_factor(rate, t))
    }

    /// Returns the rate at a target date.
    ///
    /// # Errors
    ///
    /// Returns an error for dates before the curve date.
    fn date_rate(&self, date: Date) -> CurveResult<f64> {
        self.get_rate(self.year_fraction(date))
    }

    /// Returns the discount factor at a target date.
    ///
    /// # Errors
    ///
    /// Returns an error for dates before the curve date.
    fn discount_date(&self, date: Date) -> CurveResult<f64> {
        self.discount_t(self.year_fraction(date))
    }

    /// Year fraction from the curve date to `date` under the curve's day count.
    fn year_fraction(&self, date: Date) -> f64 {
        self.day_count()
            .year_fraction_f64(self.curve_date(), date)
    }

    /// The tag identifying this curve type in serialized payloads.
    fn type_tag(&self) -> &'static str;

    /// The curve's structural representation, reconstructable via
    /// [`curve_from_dict`](crate::serialize::curve_from_dict).
    fn as_dict(&self) -> Value;
}

/// Validates a query horizon: finite and non-negative.
pub(crate) fn check_horizon(t: f64) -> CurveResult<()> {
    if !t.is_finite() || t < 0.0 {
        return Err(CurveError::invalid_value(format!(
            "time horizon must be finite and non-negative, got {t}"
        )));
    }
    Ok(())
}
