//! Maturity points expressed relative to a curve date.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

use super::Date;

/// A maturity point: an explicit date, or a calendar offset from the curve date.
///
/// Tenors serialize as strings: `"3M"`, `"10Y"`, or an ISO date.
///
/// # Example
///
/// ```rust
/// use strata_core::types::{Date, Tenor};
///
/// let curve_date = Date::from_ymd(2025, 8, 22).unwrap();
/// let tenor: Tenor = "6M".parse().unwrap();
/// assert_eq!(
///     tenor.resolve(curve_date).unwrap(),
///     Date::from_ymd(2026, 2, 22).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tenor {
    /// An explicit maturity date.
    Date(Date),
    /// A whole number of months from the curve date.
    Months(u32),
    /// A whole number of years from the curve date.
    Years(u32),
}

impl Tenor {
    /// Resolves the tenor to a concrete date relative to `curve_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset leaves the representable date range.
    pub fn resolve(&self, curve_date: Date) -> CoreResult<Date> {
        match self {
            Tenor::Date(date) => Ok(*date),
            Tenor::Months(n) => curve_date.add_months(*n as i32),
            Tenor::Years(n) => curve_date.add_years(*n as i32),
        }
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.contains('-') {
            return Date::parse(trimmed).map(Tenor::Date);
        }
        let mut chars = trimmed.chars();
        let unit = chars.next_back().ok_or_else(|| CoreError::tenor_parse(s))?;
        let n: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| CoreError::tenor_parse(s))?;
        match unit {
            'M' | 'm' => Ok(Tenor::Months(n)),
            'Y' | 'y' => Ok(Tenor::Years(n)),
            _ => Err(CoreError::tenor_parse(s)),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Date(date) => write!(f, "{date}"),
            Tenor::Months(n) => write!(f, "{n}M"),
            Tenor::Years(n) => write!(f, "{n}Y"),
        }
    }
}

impl From<Date> for Tenor {
    fn from(date: Date) -> Self {
        Tenor::Date(date)
    }
}

impl Serialize for Tenor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tenor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offsets() {
        assert_eq!("1M".parse::<Tenor>().unwrap(), Tenor::Months(1));
        assert_eq!("6m".parse::<Tenor>().unwrap(), Tenor::Months(6));
        assert_eq!("30Y".parse::<Tenor>().unwrap(), Tenor::Years(30));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            "2030-06-15".parse::<Tenor>().unwrap(),
            Tenor::Date(Date::from_ymd(2030, 6, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<Tenor>().is_err());
        assert!("10W".parse::<Tenor>().is_err());
        assert!("Y".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_resolve() {
        let curve_date = Date::from_ymd(2025, 8, 22).unwrap();
        assert_eq!(
            Tenor::Months(3).resolve(curve_date).unwrap(),
            Date::from_ymd(2025, 11, 22).unwrap()
        );
        assert_eq!(
            Tenor::Years(2).resolve(curve_date).unwrap(),
            Date::from_ymd(2027, 8, 22).unwrap()
        );
        let explicit = Date::from_ymd(2031, 1, 1).unwrap();
        assert_eq!(Tenor::Date(explicit).resolve(curve_date).unwrap(), explicit);
    }

    #[test]
    fn test_serde_roundtrip() {
        for tenor in [
            Tenor::Months(3),
            Tenor::Years(10),
            Tenor::Date(Date::from_ymd(2030, 1, 1).unwrap()),
        ] {
            let json = serde_json::to_string(&tenor).unwrap();
            let back: Tenor = serde_json::from_str(&json).unwrap();
            assert_eq!(back, tenor);
        }
    }
}
