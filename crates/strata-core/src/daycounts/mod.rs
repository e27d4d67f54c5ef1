//! Day count conventions.
//!
//! A day count convention maps a pair of calendar dates to a year fraction.
//! Every curve owns one and uses it to turn dates into the time axis its
//! rates are defined on.
//!
//! # Supported conventions
//!
//! - [`Act365Fixed`]: Actual/365 Fixed — the toolkit default
//! - [`Act360`]: Actual/360 — money market convention
//! - [`Thirty360US`]: 30/360 US (Bond Basis) — US corporate bonds
//! - [`ActActIsda`]: Actual/Actual ISDA — year-based leap split
//!
//! # Usage
//!
//! ```rust
//! use strata_core::daycounts::{Act365Fixed, DayCount, DayCountConvention};
//! use strata_core::types::Date;
//!
//! let dc = Act365Fixed;
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 7, 1).unwrap();
//! let yf = dc.year_fraction(start, end);
//!
//! // Or select by registered name
//! let convention: DayCountConvention = "actual/365".parse().unwrap();
//! assert_eq!(convention, DayCountConvention::Act365Fixed);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::Thirty360US;

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be deterministic and thread-safe.
pub trait DayCount: Send + Sync {
    /// Returns the convention's canonical name.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64`, for curve arithmetic.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(0.0)
    }
}

/// Enumeration of the supported day count conventions.
///
/// Provides runtime selection by name and conversion to a shared
/// trait object via [`DayCountConvention::to_day_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/365 Fixed.
    Act365Fixed,
    /// Actual/360.
    Act360,
    /// 30/360 US (Bond Basis).
    Thirty360US,
    /// Actual/Actual ISDA.
    ActActIsda,
}

impl DayCountConvention {
    /// Creates a shared day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Arc<dyn DayCount> {
        match self {
            DayCountConvention::Act365Fixed => Arc::new(Act365Fixed),
            DayCountConvention::Act360 => Arc::new(Act360),
            DayCountConvention::Thirty360US => Arc::new(Thirty360US),
            DayCountConvention::ActActIsda => Arc::new(ActActIsda),
        }
    }

    /// Returns the convention's canonical name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act365Fixed,
            DayCountConvention::Act360,
            DayCountConvention::Thirty360US,
            DayCountConvention::ActActIsda,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DayCountParseError;

    /// Parses a day count convention name.
    ///
    /// Accepts Bloomberg-style names ("ACT/365F", "30/360 US") and the
    /// lowercase aliases common in curve definitions ("actual/365",
    /// "actual/360", "30/360", "actual/actual"). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        match normalized.trim() {
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACTUAL/365 FIXED"
            | "ACT365" | "ACT365FIXED" => Ok(DayCountConvention::Act365Fixed),

            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),

            "30/360" | "30/360 US" | "30U/360" | "BOND" | "THIRTY360US" => {
                Ok(DayCountConvention::Thirty360US)
            }

            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTUAL/ACTUAL ISDA" | "ACTACT"
            | "ACTACTISDA" => Ok(DayCountConvention::ActActIsda),

            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

/// Error type for parsing day count convention names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_all_conventions_half_year() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();
        for convention in DayCountConvention::all() {
            let dc = convention.to_day_count();
            assert!(!dc.name().is_empty());
            let yf = dc.year_fraction(start, end);
            assert!(yf > dec!(0.4) && yf < dec!(0.6), "{}: {yf}", dc.name());
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(
            "actual/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360US
        );
        assert_eq!(
            "actual/actual".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActActIsda
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let err = "actual/366".parse::<DayCountConvention>();
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("unknown"));
    }

    #[test]
    fn test_name_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }

    #[test]
    fn test_year_fraction_f64() {
        let dc = Act365Fixed;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();
        assert!((dc.year_fraction_f64(start, end) - 1.0).abs() < 1e-12);
    }
}
