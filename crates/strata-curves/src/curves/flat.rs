//! Flat (constant-rate) curves.

use std::sync::Arc;

use serde_json::{json, Value};

use strata_core::daycounts::DayCount;
use strata_core::types::{Compounding, Date};

use crate::conventions::DayCountSpec;
use crate::error::CurveResult;
use crate::serialize::{field_date, field_f64};
use crate::traits::{check_horizon, Curve};

/// A flat curve quoted as an annual effective rate (AER).
///
/// `get_rate(t)` is the same rate at every horizon and
/// `discount_t(t) = (1 + rate)^-t`.
///
/// # Example
///
/// ```rust
/// use strata_curves::prelude::*;
/// use strata_core::types::Date;
///
/// let curve = FlatCurveAer::new(
///     0.05,
///     Date::from_ymd(2025, 1, 1).unwrap(),
///     "actual/365",
/// )
/// .unwrap();
/// assert_eq!(curve.get_rate(7.5).unwrap(), 0.05);
/// assert!((curve.discount_t(1.0).unwrap() - 1.0 / 1.05).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct FlatCurveAer {
    rate: f64,
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
}

impl FlatCurveAer {
    /// Creates a flat AER curve.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite rate, a rate at or below -100%,
    /// or an unresolvable day count selector.
    pub fn new(
        rate: f64,
        curve_date: Date,
        day_count: impl Into<DayCountSpec>,
    ) -> CurveResult<Self> {
        validate_flat_rate(rate)?;
        Ok(Self {
            rate,
            curve_date,
            day_count: day_count.into().resolve()?,
        })
    }

    /// Returns the constant annual effective rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or mistyped fields.
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        Self::new(
            field_f64(value, "rate")?,
            field_date(value, "curve_date")?,
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        )
    }
}

impl Curve for FlatCurveAer {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        Ok(self.rate)
    }

    fn type_tag(&self) -> &'static str {
        "flat_aer"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "rate": self.rate,
        })
    }
}

impl std::fmt::Debug for FlatCurveAer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatCurveAer")
            .field("rate", &self.rate)
            .field("curve_date", &self.curve_date)
            .field("day_count", &self.day_count.name())
            .finish()
    }
}

/// A flat curve quoted as a continuously compounded rate.
///
/// `discount_t(t) = e^{-rate * t}`.
#[derive(Clone)]
pub struct FlatCurveLog {
    rate: f64,
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
}

impl FlatCurveLog {
    /// Creates a flat continuously compounded curve.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite rate or an unresolvable day count
    /// selector.
    pub fn new(
        rate: f64,
        curve_date: Date,
        day_count: impl Into<DayCountSpec>,
    ) -> CurveResult<Self> {
        validate_flat_rate(rate)?;
        Ok(Self {
            rate,
            curve_date,
            day_count: day_count.into().resolve()?,
        })
    }

    /// Returns the constant continuously compounded rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or mistyped fields.
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        Self::new(
            field_f64(value, "rate")?,
            field_date(value, "curve_date")?,
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        )
    }
}

impl Curve for FlatCurveLog {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn compounding(&self) -> Compounding {
        Compounding::Continuous
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        Ok(self.rate)
    }

    fn type_tag(&self) -> &'static str {
        "flat_log"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "rate": self.rate,
        })
    }
}

impl std::fmt::Debug for FlatCurveLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatCurveLog")
            .field("rate", &self.rate)
            .field("curve_date", &self.curve_date)
            .field("day_count", &self.day_count.name())
            .finish()
    }
}

fn validate_flat_rate(rate: f64) -> CurveResult<()> {
    use crate::error::CurveError;
    if !rate.is_finite() || rate <= -1.0 {
        return Err(CurveError::invalid_value(format!(
            "flat rate must be finite and above -100%, got {rate}"
        )));
    }
    Ok(())
}
