//! Interest rate compounding conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Frequency;

/// Interest rate compounding convention.
///
/// Every convention defines an annual growth factor, so rates can be
/// converted between conventions independently of the horizon:
///
/// - `Annual`: `1 + r`
/// - periodic (m per year): `(1 + r/m)^m`
/// - `Continuous`: `e^r`
///
/// # Example
///
/// ```rust
/// use strata_core::types::Compounding;
///
/// let df = Compounding::Annual.discount_factor(0.05, 1.0);
/// assert!((df - 1.0 / 1.05).abs() < 1e-12);
///
/// let cont = Compounding::Annual.convert(0.05, Compounding::Continuous);
/// assert!((cont - 1.05f64.ln()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compounding {
    /// Annual effective rate (AER).
    Annual,
    /// Semi-annual compounding (bond equivalent yield when quoted).
    SemiAnnual,
    /// Quarterly compounding.
    Quarterly,
    /// Monthly compounding.
    Monthly,
    /// Continuous compounding.
    Continuous,
}

impl Compounding {
    /// Returns the compounding periods per year, or `None` for continuous.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Compounding::Annual => Some(1),
            Compounding::SemiAnnual => Some(2),
            Compounding::Quarterly => Some(4),
            Compounding::Monthly => Some(12),
            Compounding::Continuous => None,
        }
    }

    /// Returns the annual growth factor for a rate under this convention.
    pub fn growth_factor(&self, rate: f64) -> f64 {
        match self.periods_per_year() {
            Some(m) => {
                let m = f64::from(m);
                (1.0 + rate / m).powf(m)
            }
            None => rate.exp(),
        }
    }

    /// Recovers the rate from an annual growth factor.
    pub fn rate_from_growth(&self, factor: f64) -> f64 {
        match self.periods_per_year() {
            Some(m) => {
                let m = f64::from(m);
                m * (factor.powf(1.0 / m) - 1.0)
            }
            None => factor.ln(),
        }
    }

    /// Returns the discount factor for `rate` over `t` years.
    ///
    /// Returns 1.0 for `t <= 0`.
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        match self.periods_per_year() {
            Some(m) => {
                let m = f64::from(m);
                (1.0 + rate / m).powf(-m * t)
            }
            None => (-rate * t).exp(),
        }
    }

    /// Recovers the rate implied by a discount factor over `t` years.
    ///
    /// Returns 0.0 when `t <= 0` or the discount factor is non-positive.
    pub fn zero_rate(&self, discount_factor: f64, t: f64) -> f64 {
        if t <= 0.0 || discount_factor <= 0.0 {
            return 0.0;
        }
        match self.periods_per_year() {
            Some(m) => {
                let m = f64::from(m);
                m * (discount_factor.powf(-1.0 / (m * t)) - 1.0)
            }
            None => -discount_factor.ln() / t,
        }
    }

    /// Converts a rate quoted under this convention to another convention.
    pub fn convert(&self, rate: f64, to: Compounding) -> f64 {
        if *self == to {
            return rate;
        }
        to.rate_from_growth(self.growth_factor(rate))
    }
}

impl From<Frequency> for Compounding {
    /// Maps a coupon frequency to its natural compounding convention.
    ///
    /// Zero-coupon instruments quote annual effective rates.
    fn from(freq: Frequency) -> Self {
        match freq {
            Frequency::Annual | Frequency::Zero => Compounding::Annual,
            Frequency::SemiAnnual => Compounding::SemiAnnual,
            Frequency::Quarterly => Compounding::Quarterly,
            Frequency::Monthly => Compounding::Monthly,
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}
