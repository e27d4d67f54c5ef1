//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{EndBehavior, Interpolator};

/// Linear interpolation between data points.
///
/// # Example
///
/// ```rust
/// use strata_math::interpolation::{EndBehavior, Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0])
///     .unwrap()
///     .with_end_behavior(EndBehavior::Clamp);
/// assert_eq!(interp.interpolate(0.5).unwrap(), 1.0);
/// assert_eq!(interp.interpolate(5.0).unwrap(), 4.0); // clamped to the last value
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    end_behavior: EndBehavior,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error when fewer than two points are given, when the
    /// lengths differ, or when the abscissas are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have the same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            end_behavior: EndBehavior::Error,
        })
    }

    /// Sets the behavior for points outside the data range.
    #[must_use]
    pub fn with_end_behavior(mut self, end_behavior: EndBehavior) -> Self {
        self.end_behavior = end_behavior;
        self
    }

    /// Index of the segment containing `x` (the last segment for `x` past the end).
    fn segment(&self, x: f64) -> usize {
        match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(i) => i.min(self.xs.len() - 2),
            Err(i) => i.saturating_sub(1).min(self.xs.len() - 2),
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let (min, max) = (self.min_x(), self.max_x());
        let x = if x < min || x > max {
            match self.end_behavior {
                EndBehavior::Error => {
                    return Err(MathError::OutOfRange { x, min, max });
                }
                EndBehavior::Clamp => x.clamp(min, max),
                EndBehavior::Extend => x,
            }
        } else {
            x
        };

        let i = self.segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn fixture() -> LinearInterpolator {
        LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0]).unwrap()
    }

    #[test]
    fn test_exact_points() {
        let interp = fixture();
        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 2.0);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 4.0);
    }

    #[test]
    fn test_midpoints() {
        let interp = fixture();
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.0);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 3.0);
    }

    #[test]
    fn test_out_of_range_errors() {
        let interp = fixture();
        assert!(interp.interpolate(-0.5).is_err());
        assert!(interp.interpolate(2.5).is_err());
    }

    #[test]
    fn test_clamped_ends() {
        let interp = fixture().with_end_behavior(EndBehavior::Clamp);
        assert_relative_eq!(interp.interpolate(-1.0).unwrap(), 0.0);
        assert_relative_eq!(interp.interpolate(10.0).unwrap(), 4.0);
    }

    #[test]
    fn test_extended_ends() {
        let interp = fixture().with_end_behavior(EndBehavior::Extend);
        assert_relative_eq!(interp.interpolate(-1.0).unwrap(), -2.0);
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 6.0);
    }

    #[test]
    fn test_too_few_points() {
        assert!(LinearInterpolator::new(vec![1.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_unsorted_rejected() {
        assert!(LinearInterpolator::new(vec![1.0, 0.0, 2.0], vec![0.0, 1.0, 2.0]).is_err());
        assert!(LinearInterpolator::new(vec![0.0, 0.0, 2.0], vec![0.0, 1.0, 2.0]).is_err());
    }

    proptest! {
        #[test]
        fn prop_interpolant_within_hull(x in 0.0..2.0f64) {
            let interp = fixture();
            let y = interp.interpolate(x).unwrap();
            prop_assert!((0.0..=4.0).contains(&y));
        }
    }
}
