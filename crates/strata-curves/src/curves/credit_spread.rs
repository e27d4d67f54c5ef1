//! Credit spread curves.
//!
//! Spread curves quote additive credit spreads over a benchmark. They share
//! the [`Curve`] contract — `get_rate(t)` is the spread at horizon `t` — so
//! [`CombinedCurve`](crate::curves::CombinedCurve) can compose them with
//! any benchmark curve.

use std::sync::Arc;

use serde_json::{json, Value};

use strata_core::daycounts::DayCount;
use strata_core::types::Date;

use crate::conventions::DayCountSpec;
use crate::curves::{clamped_rate, prepare_pillars};
use crate::error::CurveResult;
use crate::serialize::{field_date, field_f64, field_pairs, pairs_value};
use crate::traits::{check_horizon, Curve};

/// A constant additive credit spread.
#[derive(Clone)]
pub struct FlatCreditSpreadCurve {
    spread: f64,
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
}

impl FlatCreditSpreadCurve {
    /// Creates a flat credit spread curve.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite spread or an unresolvable day
    /// count selector.
    pub fn new(
        spread: f64,
        curve_date: Date,
        day_count: impl Into<DayCountSpec>,
    ) -> CurveResult<Self> {
        use crate::error::CurveError;
        if !spread.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "credit spread must be finite, got {spread}"
            )));
        }
        Ok(Self {
            spread,
            curve_date,
            day_count: day_count.into().resolve()?,
        })
    }

    /// Returns the constant spread.
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or mistyped fields.
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        Self::new(
            field_f64(value, "spread")?,
            field_date(value, "curve_date")?,
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        )
    }
}

impl Curve for FlatCreditSpreadCurve {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        Ok(self.spread)
    }

    fn type_tag(&self) -> &'static str {
        "flat_credit_spread"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "spread": self.spread,
        })
    }
}

impl std::fmt::Debug for FlatCreditSpreadCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatCreditSpreadCurve")
            .field("spread", &self.spread)
            .field("curve_date", &self.curve_date)
            .finish()
    }
}

/// A term structure of credit spreads keyed by maturity.
///
/// Spreads interpolate linearly between pillars and stay flat beyond the
/// first and last maturities.
#[derive(Clone)]
pub struct CreditSpreadCurve {
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
    times: Vec<f64>,
    spreads: Vec<f64>,
}

impl CreditSpreadCurve {
    /// Creates a spread curve from `(maturity, spread)` pillars.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty, unsorted-with-duplicates, or
    /// non-finite pillar set, or an unresolvable day count selector.
    pub fn new(
        curve_date: Date,
        spreads: Vec<(f64, f64)>,
        day_count: impl Into<DayCountSpec>,
    ) -> CurveResult<Self> {
        let (times, spreads) = prepare_pillars(spreads, "credit spread")?;
        Ok(Self {
            curve_date,
            day_count: day_count.into().resolve()?,
            times,
            spreads,
        })
    }

    /// Returns the spread pillars as `(maturity, spread)` pairs.
    pub fn spreads(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.spreads.iter().copied())
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or mistyped fields.
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        Self::new(
            field_date(value, "curve_date")?,
            field_pairs(value, "spreads")?,
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        )
    }
}

impl Curve for CreditSpreadCurve {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        clamped_rate(&self.times, &self.spreads, t)
    }

    fn type_tag(&self) -> &'static str {
        "credit_spread"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "spreads": pairs_value(self.spreads()),
        })
    }
}

impl std::fmt::Debug for CreditSpreadCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditSpreadCurve")
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

    #[test]
    fn test_flat_spread() {
        let curve = FlatCreditSpreadCurve::new(0.03, curve_date(), "actual/365").unwrap();
        assert_relative_eq!(curve.get_rate(0.0).unwrap(), 0.03);
        assert_relative_eq!(curve.get_rate(30.0).unwrap(), 0.03);
    }

    #[test]
    fn test_term_structure_interpolates() {
        let curve = CreditSpreadCurve::new(
            curve_date(),
            vec![(1.0, 0.010), (5.0, 0.030), (10.0, 0.040)],
            "actual/365",
        )
        .unwrap();
        assert_relative_eq!(curve.get_rate(3.0).unwrap(), 0.020, epsilon = 1e-12);
        // Flat beyond the ends
        assert_relative_eq!(curve.get_rate(0.25).unwrap(), 0.010, epsilon = 1e-12);
        assert_relative_eq!(curve.get_rate(25.0).unwrap(), 0.040, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_spreads_rejected() {
        assert!(CreditSpreadCurve::new(curve_date(), vec![], "actual/365").is_err());
    }

    #[test]
    fn test_non_finite_spread_rejected() {
        assert!(FlatCreditSpreadCurve::new(f64::NAN, curve_date(), "actual/365").is_err());
    }
}
