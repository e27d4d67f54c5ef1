//! Dated cash flows.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Date;

/// Classification of a bond cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowKind {
    /// Regular coupon payment.
    Coupon,
    /// Principal repayment at maturity.
    Principal,
    /// Combined coupon and principal (final payment of a coupon bond).
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowKind::Coupon => "Coupon",
            CashFlowKind::Principal => "Principal",
            CashFlowKind::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A single dated cash flow, quoted per 100 of face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    date: Date,
    amount: Decimal,
    kind: CashFlowKind,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: Decimal, kind: CashFlowKind) -> Self {
        Self { date, amount, kind }
    }

    /// Returns the payment date.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the payment amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the payment amount as `f64` for curve arithmetic.
    pub fn amount_f64(&self) -> f64 {
        self.amount.to_f64().unwrap_or(0.0)
    }

    /// Returns the cash flow classification.
    pub fn kind(&self) -> CashFlowKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cash_flow_accessors() {
        let date = Date::from_ymd(2026, 2, 22).unwrap();
        let cf = CashFlow::new(date, dec!(2.245), CashFlowKind::Coupon);
        assert_eq!(cf.date(), date);
        assert_eq!(cf.amount(), dec!(2.245));
        assert!((cf.amount_f64() - 2.245).abs() < 1e-12);
        assert_eq!(cf.kind(), CashFlowKind::Coupon);
    }
}
