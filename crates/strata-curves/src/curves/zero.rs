//! Zero-coupon rate curves.

use std::sync::Arc;

use serde_json::{json, Value};

use strata_core::daycounts::DayCount;
use strata_core::types::{Compounding, Date};

use crate::conventions::DayCountSpec;
use crate::curves::{clamped_rate, prepare_pillars};
use crate::error::{CurveError, CurveResult};
use crate::serialize::{field_date, field_pairs, pairs_value};
use crate::traits::{check_horizon, Curve};

/// An ordered mapping from year fraction to annual effective spot rate.
///
/// The output of bootstrapping, and a curve in its own right. Rates
/// interpolate linearly between pillars and stay flat beyond the first and
/// last maturities; `discount_t(t) = (1 + z(t))^-t`.
///
/// # Example
///
/// ```rust
/// use strata_curves::prelude::*;
/// use strata_core::types::Date;
///
/// let curve = ZeroRateCurve::new(
///     Date::from_ymd(2025, 1, 1).unwrap(),
///     vec![(1.0, 0.04), (2.0, 0.045), (5.0, 0.05)],
///     "actual/365",
/// )
/// .unwrap();
/// let df = curve.discount_t(2.0).unwrap();
/// assert!(df > 0.0 && df < 1.0);
/// ```
#[derive(Clone)]
pub struct ZeroRateCurve {
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
    times: Vec<f64>,
    rates: Vec<f64>,
}

impl ZeroRateCurve {
    /// Creates a zero rate curve from `(year fraction, rate)` pillars.
    ///
    /// Pillars are sorted by time; duplicate times are a construction
    /// error, as is an empty pillar set.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid pillars or an unresolvable day count
    /// selector.
    pub fn new(
        curve_date: Date,
        zero_rates: Vec<(f64, f64)>,
        day_count: impl Into<DayCountSpec>,
    ) -> CurveResult<Self> {
        let (times, rates) = prepare_pillars(zero_rates, "zero rate")?;
        Ok(Self {
            curve_date,
            day_count: day_count.into().resolve()?,
            times,
            rates,
        })
    }

    /// Creates a zero rate curve from date-keyed rates.
    ///
    /// Each date is mapped to a year fraction with the curve's own day
    /// count convention.
    ///
    /// # Errors
    ///
    /// Returns an error for dates before the curve date, duplicate dates,
    /// or an empty input.
    pub fn from_date_rates(
        curve_date: Date,
        zero_rates: Vec<(Date, f64)>,
        day_count: impl Into<DayCountSpec>,
    ) -> CurveResult<Self> {
        let resolved = day_count.into().resolve()?;
        let pairs: Vec<(f64, f64)> = zero_rates
            .into_iter()
            .map(|(date, rate)| (resolved.year_fraction_f64(curve_date, date), rate))
            .collect();
        let (times, rates) = prepare_pillars(pairs, "zero rate")?;
        Ok(Self {
            curve_date,
            day_count: resolved,
            times,
            rates,
        })
    }

    /// Returns the interpolated zero rate at horizon `t`.
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite `t`.
    pub fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        clamped_rate(&self.times, &self.rates, t)
    }

    /// Returns the zero rate pillars as `(year fraction, rate)` pairs.
    pub fn zero_rates(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.rates.iter().copied())
    }

    /// Returns the last pillar time.
    pub fn max_time(&self) -> f64 {
        *self.times.last().unwrap_or(&0.0)
    }

    /// Converts a discount factor over `t` years back to an annual
    /// effective rate.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive `t` or discount factor.
    pub fn discount_to_rate(&self, discount_factor: f64, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "horizon must be positive to invert a discount factor, got {t}"
            )));
        }
        if discount_factor <= 0.0 || !discount_factor.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "discount factor must be positive and finite, got {discount_factor}"
            )));
        }
        Ok(Compounding::Annual.zero_rate(discount_factor, t))
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or mistyped fields.
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        Self::new(
            field_date(value, "curve_date")?,
            field_pairs(value, "zero_rates")?,
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        )
    }
}

impl Curve for ZeroRateCurve {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        self.zero_rate(t)
    }

    fn type_tag(&self) -> &'static str {
        "zero"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "zero_rates": pairs_value(self.zero_rates()),
        })
    }
}

impl std::fmt::Debug for ZeroRateCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroRateCurve")
            .field("curve_date", &self.curve_date)
            .field("pillars", &self.times.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve_date() -> Date {
        Date::from_ymd(2025, 1, 1).unwrap()
    }

    fn fixture() -> ZeroRateCurve {
        ZeroRateCurve::new(
            curve_date(),
            vec![(1.0, 0.04), (2.0, 0.045), (5.0, 0.05)],
            "actual/365",
        )
        .unwrap()
    }

    #[test]
    fn test_interpolation_between_pillars() {
        let curve = fixture();
        assert_relative_eq!(curve.zero_rate(1.5).unwrap(), 0.0425, epsilon = 1e-12);
        assert_relative_eq!(curve.zero_rate(3.5).unwrap(), 0.0475, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_beyond_ends() {
        let curve = fixture();
        assert_relative_eq!(curve.zero_rate(0.25).unwrap(), 0.04, epsilon = 1e-12);
        assert_relative_eq!(curve.zero_rate(30.0).unwrap(), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_discounting() {
        let curve = fixture();
        assert_relative_eq!(
            curve.discount_t(2.0).unwrap(),
            1.045f64.powf(-2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_discount_to_rate_roundtrip() {
        let curve = fixture();
        let df = curve.discount_t(2.0).unwrap();
        assert_relative_eq!(curve.discount_to_rate(df, 2.0).unwrap(), 0.045, epsilon = 1e-10);
    }

    #[test]
    fn test_discount_to_rate_rejects_bad_inputs() {
        let curve = fixture();
        assert!(curve.discount_to_rate(0.95, 0.0).is_err());
        assert!(curve.discount_to_rate(-0.5, 1.0).is_err());
    }

    #[test]
    fn test_from_date_rates() {
        let curve = ZeroRateCurve::from_date_rates(
            curve_date(),
            vec![
                (Date::from_ymd(2026, 1, 1).unwrap(), 0.04),
                (Date::from_ymd(2027, 1, 1).unwrap(), 0.045),
            ],
            "actual/365",
        )
        .unwrap();
        assert_relative_eq!(curve.zero_rate(1.0).unwrap(), 0.04, epsilon = 1e-12);
        assert_relative_eq!(curve.max_time(), 730.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(ZeroRateCurve::new(curve_date(), vec![], "actual/365").is_err());
    }

    #[test]
    fn test_single_pillar_is_flat() {
        let curve =
            ZeroRateCurve::new(curve_date(), vec![(1.0, 0.04)], "actual/365").unwrap();
        assert_relative_eq!(curve.zero_rate(0.1).unwrap(), 0.04);
        assert_relative_eq!(curve.zero_rate(10.0).unwrap(), 0.04);
    }
}
