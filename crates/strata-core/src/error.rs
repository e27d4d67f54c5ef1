//! Error types for core operations.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core types and conventions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A calendar date that does not exist.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
        /// Day component.
        day: u32,
    },

    /// A date string that could not be parsed.
    #[error("cannot parse date '{input}' (expected YYYY-MM-DD)")]
    DateParse {
        /// The offending input.
        input: String,
    },

    /// A tenor string that could not be parsed.
    #[error("cannot parse tenor '{input}' (expected e.g. '3M', '10Y' or YYYY-MM-DD)")]
    TenorParse {
        /// The offending input.
        input: String,
    },

    /// Date arithmetic left the representable range.
    #[error("date arithmetic out of range: {reason}")]
    DateOutOfRange {
        /// Description of the failed operation.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(year: i32, month: u32, day: u32) -> Self {
        Self::InvalidDate { year, month, day }
    }

    /// Creates a date parse error.
    #[must_use]
    pub fn date_parse(input: impl Into<String>) -> Self {
        Self::DateParse {
            input: input.into(),
        }
    }

    /// Creates a tenor parse error.
    #[must_use]
    pub fn tenor_parse(input: impl Into<String>) -> Self {
        Self::TenorParse {
            input: input.into(),
        }
    }

    /// Creates a date-out-of-range error.
    #[must_use]
    pub fn date_out_of_range(reason: impl Into<String>) -> Self {
        Self::DateOutOfRange {
            reason: reason.into(),
        }
    }
}
