//! Error types for curve construction and queries.
//!
//! Every failure is surfaced at construction time; a curve that exists is
//! fully valid, and queries only fail on malformed arguments.

use thiserror::Error;

use strata_core::types::Date;
use strata_core::CoreError;
use strata_math::MathError;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors raised by curve construction and queries.
#[derive(Error, Debug)]
pub enum CurveError {
    /// Structurally invalid or underspecified curve definition.
    #[error("curve construction failed: {reason}")]
    Construction {
        /// Description of the violated constraint.
        reason: String,
    },

    /// An input of the wrong kind, e.g. a non-string day count selector.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// What the input should have been.
        expected: String,
        /// What was actually provided.
        got: String,
    },

    /// A bootstrap step failed to converge within its iteration budget.
    #[error(
        "bootstrap failed to converge for {instrument} after {iterations} iterations \
         (residual: {residual:.2e})"
    )]
    Convergence {
        /// Description of the instrument being solved.
        instrument: String,
        /// Number of iterations attempted.
        iterations: u32,
        /// Final pricing residual.
        residual: f64,
    },

    /// Combined curve children disagree on the valuation date.
    #[error("curve date mismatch: benchmark is {benchmark}, spread is {spread}")]
    CurveDateMismatch {
        /// The benchmark child's curve date.
        benchmark: Date,
        /// The spread child's curve date.
        spread: Date,
    },

    /// A query or input value outside its valid domain.
    #[error("invalid value: {reason}")]
    InvalidValue {
        /// Description of the invalid value.
        reason: String,
    },

    /// A malformed serialized curve payload.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the malformed payload.
        reason: String,
    },

    /// An underlying numerical failure.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates a construction error.
    #[must_use]
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::Construction {
            reason: reason.into(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Creates a convergence error.
    #[must_use]
    pub fn convergence(instrument: impl Into<String>, iterations: u32, residual: f64) -> Self {
        Self::Convergence {
            instrument: instrument.into(),
            iterations,
            residual,
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for CurveError {
    fn from(err: CoreError) -> Self {
        Self::InvalidValue {
            reason: err.to_string(),
        }
    }
}

impl From<strata_bonds::BondError> for CurveError {
    fn from(err: strata_bonds::BondError) -> Self {
        Self::Construction {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_display() {
        let err = CurveError::convergence("par 10Y @ 100", 100, 3.5e-4);
        let msg = err.to_string();
        assert!(msg.contains("par 10Y"));
        assert!(msg.contains("100 iterations"));
    }

    #[test]
    fn test_date_mismatch_display() {
        let err = CurveError::CurveDateMismatch {
            benchmark: Date::from_ymd(2025, 1, 1).unwrap(),
            spread: Date::from_ymd(2025, 6, 1).unwrap(),
        };
        assert!(err.to_string().contains("2025-06-01"));
    }

    #[test]
    fn test_math_error_bridges() {
        let math = MathError::convergence_failed(50, 1e-3);
        let curve: CurveError = math.into();
        assert!(matches!(curve, CurveError::Math(_)));
    }
}
