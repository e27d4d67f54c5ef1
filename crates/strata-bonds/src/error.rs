//! Error types for bond construction and pricing.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors raised by bond construction and pricing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Structurally invalid bond definition.
    #[error("bond construction failed: {reason}")]
    Construction {
        /// Description of the violated constraint.
        reason: String,
    },

    /// A pricing input outside its valid domain.
    #[error("invalid pricing input: {reason}")]
    Pricing {
        /// Description of the invalid input.
        reason: String,
    },
}

impl BondError {
    /// Creates a construction error.
    #[must_use]
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::Construction {
            reason: reason.into(),
        }
    }

    /// Creates a pricing error.
    #[must_use]
    pub fn pricing(reason: impl Into<String>) -> Self {
        Self::Pricing {
            reason: reason.into(),
        }
    }
}
