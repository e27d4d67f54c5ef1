//! Bond pricing mode.

use serde::{Deserialize, Serialize};

/// How a bond's value is quoted: a clean price or a yield to maturity,
/// never both, never neither.
///
/// Yields are quoted annual effective, matching the zero-rate convention
/// of the bootstrapped curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pricing {
    /// Clean price per 100 of face value.
    CleanPrice(f64),
    /// Annual effective yield to maturity (as a decimal, e.g. 0.0449).
    YieldToMaturity(f64),
}

impl Pricing {
    /// Returns the quoted clean price, if this is a price quote.
    pub fn clean_price(&self) -> Option<f64> {
        match self {
            Pricing::CleanPrice(p) => Some(*p),
            Pricing::YieldToMaturity(_) => None,
        }
    }

    /// Returns the quoted yield, if this is a yield quote.
    pub fn yield_to_maturity(&self) -> Option<f64> {
        match self {
            Pricing::CleanPrice(_) => None,
            Pricing::YieldToMaturity(y) => Some(*y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_are_exclusive() {
        let price = Pricing::CleanPrice(99.5);
        assert_eq!(price.clean_price(), Some(99.5));
        assert_eq!(price.yield_to_maturity(), None);

        let ytm = Pricing::YieldToMaturity(0.0449);
        assert_eq!(ytm.clean_price(), None);
        assert_eq!(ytm.yield_to_maturity(), Some(0.0449));
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_value(Pricing::CleanPrice(100.0)).unwrap();
        assert_eq!(json["clean_price"], 100.0);
    }
}
