//! Market quote records for par curve construction.

use serde::{Deserialize, Serialize};

use strata_core::types::{Frequency, Tenor};

use crate::error::{CurveError, CurveResult};

/// The shape of a par curve quote.
///
/// A maturity carries exactly one of a direct zero yield or a par bond
/// quote — the variant makes "both" and "neither" unrepresentable, so the
/// bootstrapper matches exhaustively instead of sniffing field presence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quote", rename_all = "snake_case")]
pub enum QuoteKind {
    /// A directly observed zero yield (annual effective).
    ZeroYield {
        /// The quoted yield, as a decimal.
        rate: f64,
    },
    /// A coupon bond quoted at a clean price.
    ParBond {
        /// Annual coupon, as a percentage of 100 face.
        coupon: f64,
        /// Coupon frequency.
        frequency: Frequency,
        /// Clean price per 100 of face value.
        clean_price: f64,
    },
}

/// A market quote at a maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    /// The quote's maturity.
    pub maturity: Tenor,
    /// The quote's shape and values.
    pub kind: QuoteKind,
}

impl RateQuote {
    /// Creates a zero yield quote.
    #[must_use]
    pub fn zero_yield(maturity: impl Into<Tenor>, rate: f64) -> Self {
        Self {
            maturity: maturity.into(),
            kind: QuoteKind::ZeroYield { rate },
        }
    }

    /// Creates a par bond quote.
    #[must_use]
    pub fn par_bond(
        maturity: impl Into<Tenor>,
        coupon: f64,
        frequency: Frequency,
        clean_price: f64,
    ) -> Self {
        Self {
            maturity: maturity.into(),
            kind: QuoteKind::ParBond {
                coupon,
                frequency,
                clean_price,
            },
        }
    }

    /// Validates the quote's values.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError::TypeMismatch`] for non-finite or
    /// out-of-domain values: a zero yield at or below -100%, a negative
    /// coupon, a non-positive price, or a zero-coupon frequency on a par
    /// bond quote.
    pub fn validate(&self) -> CurveResult<()> {
        match self.kind {
            QuoteKind::ZeroYield { rate } => {
                if !rate.is_finite() || rate <= -1.0 {
                    return Err(CurveError::type_mismatch(
                        "a zero yield above -100%",
                        format!("{rate} at {}", self.maturity),
                    ));
                }
            }
            QuoteKind::ParBond {
                coupon,
                frequency,
                clean_price,
            } => {
                if !coupon.is_finite() || coupon < 0.0 {
                    return Err(CurveError::type_mismatch(
                        "a non-negative coupon",
                        format!("{coupon} at {}", self.maturity),
                    ));
                }
                if !clean_price.is_finite() || clean_price <= 0.0 {
                    return Err(CurveError::type_mismatch(
                        "a positive clean price",
                        format!("{clean_price} at {}", self.maturity),
                    ));
                }
                if frequency.is_zero() {
                    return Err(CurveError::type_mismatch(
                        "a coupon-paying frequency",
                        format!("zero-coupon frequency at {}", self.maturity),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::types::Tenor;

    #[test]
    fn test_validate_zero_yield() {
        assert!(RateQuote::zero_yield(Tenor::Months(3), 0.0432).validate().is_ok());
        assert!(RateQuote::zero_yield(Tenor::Months(3), -1.5).validate().is_err());
        assert!(RateQuote::zero_yield(Tenor::Months(3), f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_par_bond() {
        let good = RateQuote::par_bond(Tenor::Years(10), 4.33, Frequency::SemiAnnual, 100.0);
        assert!(good.validate().is_ok());

        let bad_price = RateQuote::par_bond(Tenor::Years(10), 4.33, Frequency::SemiAnnual, 0.0);
        assert!(bad_price.validate().is_err());

        let bad_freq = RateQuote::par_bond(Tenor::Years(10), 4.33, Frequency::Zero, 100.0);
        assert!(bad_freq.validate().is_err());
    }

    #[test]
    fn test_serde_tagged_representation() {
        let quote = RateQuote::zero_yield(Tenor::Months(6), 0.0414);
        let json = serde_json::to_value(quote).unwrap();
        assert_eq!(json["maturity"], "6M");
        assert_eq!(json["kind"]["quote"], "zero_yield");

        let back: RateQuote = serde_json::from_value(json).unwrap();
        assert_eq!(back, quote);
    }
}
