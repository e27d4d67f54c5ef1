//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: fast quadratic convergence when a derivative is available
//! - [`newton_raphson_numerical`]: Newton with a finite-difference derivative
//! - [`bisection`]: guaranteed convergence on a bracketing interval
//! - [`newton_with_fallback`]: Newton first, bisection over a caller-supplied
//!   bracket when Newton diverges — the combination the curve bootstrapper uses
//!
//! All solvers stop when the residual drops below the configured tolerance,
//! and fail with [`MathError::ConvergenceFailed`] when the iteration budget
//! runs out. The iteration cap is the sole non-termination guard.

mod bisection;
mod newton;

pub use bisection::bisection;
pub use newton::{newton_raphson, newton_raphson_numerical};

use crate::error::MathResult;

/// Default residual tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Residual tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at the root).
    pub residual: f64,
}

/// Newton-Raphson with a bisection safety net.
///
/// Runs Newton from `initial_guess` using a numerical derivative. If Newton
/// fails (divergence, zero derivative, budget exhausted), falls back to
/// bisection over `bracket`. The bracket must contain a sign change, or the
/// fallback fails with [`crate::MathError::InvalidBracket`].
///
/// # Errors
///
/// Returns the bisection error when both methods fail.
pub fn newton_with_fallback<F>(
    f: F,
    initial_guess: f64,
    bracket: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    match newton_raphson_numerical(&f, initial_guess, config) {
        Ok(result) if result.root.is_finite() => Ok(result),
        _ => {
            log::warn!(
                "Newton-Raphson failed from guess {initial_guess}; falling back to bisection on [{}, {}]",
                bracket.0,
                bracket.1
            );
            bisection(&f, bracket.0, bracket.1, config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_config_builders() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);
        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_fallback_newton_succeeds() {
        let f = |x: f64| x * x - 2.0;
        let result =
            newton_with_fallback(f, 1.5, (0.0, 2.0), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_fallback_uses_bisection() {
        // x^(1/3) has an unbounded derivative at the root; Newton from a
        // distant guess overshoots and diverges
        let f = |x: f64| x.signum() * x.abs().powf(1.0 / 3.0);
        let result =
            newton_with_fallback(f, 1.0, (-1.5, 1.0), &SolverConfig::default()).unwrap();
        assert!(result.root.abs() < 1e-8);
    }

    #[test]
    fn test_fallback_bad_bracket_fails() {
        let f = |x: f64| x * x + 1.0; // no real root
        let result = newton_with_fallback(f, 1.0, (0.0, 2.0), &SolverConfig::default());
        assert!(result.is_err());
    }
}
