//! Concrete curve types.

mod combined;
mod credit_spread;
mod flat;
mod par;
mod spot;
mod zero;

pub use combined::CombinedCurve;
pub use credit_spread::{CreditSpreadCurve, FlatCreditSpreadCurve};
pub use flat::{FlatCurveAer, FlatCurveLog};
pub use par::{ParCurve, ParCurveBuilder};
pub use spot::{SpotCurve, SpotCurveBuilder};
pub use zero::ZeroRateCurve;

use strata_math::{EndBehavior, Interpolator, LinearInterpolator};

use crate::error::CurveResult;

/// Linear interpolation over sorted pillars, flat beyond the ends.
///
/// A single pillar is a flat curve. Callers guarantee `times` is sorted,
/// strictly increasing, non-empty, and the same length as `values`.
pub(crate) fn clamped_rate(times: &[f64], values: &[f64], t: f64) -> CurveResult<f64> {
    debug_assert_eq!(times.len(), values.len());
    debug_assert!(!times.is_empty());
    if times.len() == 1 {
        return Ok(values[0]);
    }
    let interp = LinearInterpolator::new(times.to_vec(), values.to_vec())?
        .with_end_behavior(EndBehavior::Clamp);
    Ok(interp.interpolate(t)?)
}

/// Validates and normalizes a pillar list: sorted by time, strictly
/// increasing, non-negative times, finite values.
pub(crate) fn prepare_pillars(
    mut pairs: Vec<(f64, f64)>,
    what: &str,
) -> CurveResult<(Vec<f64>, Vec<f64>)> {
    use crate::error::CurveError;

    if pairs.is_empty() {
        return Err(CurveError::construction(format!(
            "at least one {what} pillar is required"
        )));
    }
    for &(t, value) in &pairs {
        if !t.is_finite() || t < 0.0 {
            return Err(CurveError::invalid_value(format!(
                "{what} pillar time must be finite and non-negative, got {t}"
            )));
        }
        if !value.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "{what} pillar value at t={t} must be finite, got {value}"
            )));
        }
    }
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    if pairs.windows(2).any(|w| w[1].0 - w[0].0 < 1e-12) {
        return Err(CurveError::construction(format!(
            "{what} pillar times must be strictly increasing"
        )));
    }
    Ok(pairs.into_iter().unzip())
}
