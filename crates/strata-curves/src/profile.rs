//! Sampled curve series for plotting collaborators.
//!
//! Renderers consume `get_rate` and `discount_t` over a generated time
//! grid plus the curve date for labeling. [`CurveProfile`] produces that
//! series as plain serializable data; it owns no state and touches the
//! curve read-only.

use serde::Serialize;

use strata_core::types::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// One sampled point of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Horizon in years.
    pub t: f64,
    /// Rate at the horizon.
    pub rate: f64,
    /// Discount factor at the horizon.
    pub discount: f64,
}

/// A curve sampled over a uniform time grid.
#[derive(Debug, Clone, Serialize)]
pub struct CurveProfile {
    /// The curve's valuation date, for axis labeling.
    pub curve_date: Date,
    /// Series label.
    pub label: String,
    /// The sampled points, ascending in `t`.
    pub points: Vec<CurvePoint>,
}

impl CurveProfile {
    /// Samples a curve on `points` equally spaced horizons over `[0, t_max]`.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive `t_max` or fewer than two
    /// points.
    pub fn sample(
        curve: &dyn Curve,
        label: impl Into<String>,
        t_max: f64,
        points: usize,
    ) -> CurveResult<Self> {
        if !t_max.is_finite() || t_max <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "profile horizon must be positive, got {t_max}"
            )));
        }
        if points < 2 {
            return Err(CurveError::invalid_value(format!(
                "a profile needs at least two points, got {points}"
            )));
        }

        let step = t_max / (points - 1) as f64;
        let mut sampled = Vec::with_capacity(points);
        for i in 0..points {
            let t = step * i as f64;
            sampled.push(CurvePoint {
                t,
                rate: curve.get_rate(t)?,
                discount: curve.discount_t(t)?,
            });
        }

        Ok(Self {
            curve_date: curve.curve_date(),
            label: label.into(),
            points: sampled,
        })
    }

    /// Samples the rate difference of two curves over a shared grid.
    ///
    /// The `rate` of each point is `curve - other`; the `discount` is the
    /// ratio of the discount factors.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CurveProfile::sample`].
    pub fn spread_to(
        curve: &dyn Curve,
        other: &dyn Curve,
        label: impl Into<String>,
        t_max: f64,
        points: usize,
    ) -> CurveResult<Self> {
        let own = Self::sample(curve, "", t_max, points)?;
        let reference = Self::sample(other, "", t_max, points)?;

        let diffed = own
            .points
            .iter()
            .zip(reference.points.iter())
            .map(|(a, b)| CurvePoint {
                t: a.t,
                rate: a.rate - b.rate,
                discount: if b.discount > 0.0 {
                    a.discount / b.discount
                } else {
                    f64::NAN
                },
            })
            .collect();

        Ok(Self {
            curve_date: curve.curve_date(),
            label: label.into(),
            points: diffed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::curves::FlatCurveAer;

    fn curve() -> FlatCurveAer {
        FlatCurveAer::new(0.05, Date::from_ymd(2025, 1, 1).unwrap(), "actual/365").unwrap()
    }

    #[test]
    fn test_sample_grid_shape() {
        let profile = CurveProfile::sample(&curve(), "flat 5%", 30.0, 31).unwrap();
        assert_eq!(profile.points.len(), 31);
        assert_relative_eq!(profile.points[0].t, 0.0);
        assert_relative_eq!(profile.points[30].t, 30.0);
        assert_relative_eq!(profile.points[0].discount, 1.0);
        assert!(profile.points.windows(2).all(|w| w[0].t < w[1].t));
    }

    #[test]
    fn test_sample_rejects_degenerate_grids() {
        assert!(CurveProfile::sample(&curve(), "x", 0.0, 10).is_err());
        assert!(CurveProfile::sample(&curve(), "x", 10.0, 1).is_err());
    }

    #[test]
    fn test_spread_to_flat_pair() {
        let high = curve();
        let low =
            FlatCurveAer::new(0.03, Date::from_ymd(2025, 1, 1).unwrap(), "actual/365").unwrap();
        let profile = CurveProfile::spread_to(&high, &low, "diff", 10.0, 11).unwrap();
        for point in &profile.points {
            assert_relative_eq!(point.rate, 0.02, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_profile_serializes() {
        let profile = CurveProfile::sample(&curve(), "flat 5%", 5.0, 6).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["label"], "flat 5%");
        assert_eq!(json["curve_date"], "2025-01-01");
        assert_eq!(json["points"].as_array().unwrap().len(), 6);
    }
}
