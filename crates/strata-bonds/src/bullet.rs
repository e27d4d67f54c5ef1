//! Fixed-rate bullet bonds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use strata_core::daycounts::DayCount;
use strata_core::types::{CashFlow, CashFlowKind, Compounding, Date, Frequency};

use crate::error::{BondError, BondResult};
use crate::pricing::Pricing;

/// A fixed-rate bullet bond: level coupons, full principal at maturity.
///
/// Coupons are quoted as an annual percentage of a face value of 100
/// (e.g. `3.79` pays 1.895 per 100 semi-annually). The coupon schedule is
/// rolled backward from maturity in steps of the coupon period, so the
/// maturity date anchors the cycle.
///
/// The bond is priced by exactly one of a clean price or an annual
/// effective yield to maturity ([`Pricing`]). Settlement is assumed to fall
/// on a schedule anchor, so accrued interest is zero and the clean price
/// equals the present value of the remaining cash flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedRateBullet {
    issue_date: Date,
    maturity: Date,
    coupon: f64,
    frequency: Frequency,
    pricing: Pricing,
    settlement_date: Date,
}

impl FixedRateBullet {
    /// Creates a new fixed-rate bullet bond.
    ///
    /// # Errors
    ///
    /// Returns an error when the dates are out of order, the coupon is
    /// negative or inconsistent with a zero-coupon frequency, or the
    /// pricing quote is outside its domain.
    pub fn new(
        issue_date: Date,
        maturity: Date,
        coupon: f64,
        frequency: Frequency,
        pricing: Pricing,
        settlement_date: Date,
    ) -> BondResult<Self> {
        if maturity <= issue_date {
            return Err(BondError::construction(format!(
                "maturity {maturity} must be after issue date {issue_date}"
            )));
        }
        if settlement_date < issue_date || settlement_date >= maturity {
            return Err(BondError::construction(format!(
                "settlement date {settlement_date} must lie in [{issue_date}, {maturity})"
            )));
        }
        if !coupon.is_finite() || coupon < 0.0 {
            return Err(BondError::construction(format!(
                "coupon must be a non-negative percentage, got {coupon}"
            )));
        }
        if frequency.is_zero() && coupon > 0.0 {
            return Err(BondError::construction(
                "a zero-coupon bond cannot pay a coupon",
            ));
        }
        match pricing {
            Pricing::CleanPrice(p) if !p.is_finite() || p <= 0.0 => {
                return Err(BondError::pricing(format!(
                    "clean price must be positive, got {p}"
                )));
            }
            Pricing::YieldToMaturity(y) if !y.is_finite() || y <= -1.0 => {
                return Err(BondError::pricing(format!(
                    "yield to maturity must be greater than -100%, got {y}"
                )));
            }
            _ => {}
        }

        Ok(Self {
            issue_date,
            maturity,
            coupon,
            frequency,
            pricing,
            settlement_date,
        })
    }

    /// Returns the issue date.
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the annual coupon, as a percentage of 100 face.
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the coupon frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the pricing quote.
    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// Returns the settlement date.
    pub fn settlement_date(&self) -> Date {
        self.settlement_date
    }

    /// Coupon payment dates after settlement, ascending, ending at maturity.
    ///
    /// Each date is offset from maturity directly, so end-of-month clamping
    /// does not accumulate across periods.
    fn schedule_dates(&self) -> Vec<Date> {
        let step = self.frequency.months_per_period() as i32;
        if step == 0 {
            return vec![self.maturity];
        }

        let mut dates = Vec::new();
        let mut k = 0;
        while let Ok(date) = self.maturity.add_months(-k * step) {
            if date <= self.settlement_date || date <= self.issue_date {
                break;
            }
            dates.push(date);
            k += 1;
        }
        dates.reverse();
        dates
    }

    /// The ordered remaining cash flows per 100 of face value.
    ///
    /// A zero-coupon bond has a single principal flow at maturity; a coupon
    /// bond pays `coupon / frequency` on each schedule date with the
    /// principal folded into the final payment.
    pub fn cash_flows(&self) -> Vec<CashFlow> {
        let face = Decimal::from(100);
        if self.frequency.is_zero() || self.coupon == 0.0 {
            return vec![CashFlow::new(self.maturity, face, CashFlowKind::Principal)];
        }

        let per_period = self.coupon / f64::from(self.frequency.periods_per_year());
        let coupon_amount = Decimal::from_f64_retain(per_period).unwrap_or(Decimal::ZERO);

        let dates = self.schedule_dates();
        let last = dates.len() - 1;
        dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                if i == last {
                    CashFlow::new(date, face + coupon_amount, CashFlowKind::CouponAndPrincipal)
                } else {
                    CashFlow::new(date, coupon_amount, CashFlowKind::Coupon)
                }
            })
            .collect()
    }

    /// Cash flows as `(year fraction from settlement, amount)` pairs.
    pub fn time_to_payments(&self, day_count: &dyn DayCount) -> Vec<(f64, f64)> {
        self.cash_flows()
            .iter()
            .map(|cf| {
                (
                    day_count.year_fraction_f64(self.settlement_date, cf.date()),
                    cf.amount_f64(),
                )
            })
            .collect()
    }

    /// The clean price per 100 of face value.
    ///
    /// A price quote is returned as-is; a yield quote is converted by
    /// discounting the remaining cash flows at the annual effective yield.
    pub fn clean_price(&self, day_count: &dyn DayCount) -> f64 {
        match self.pricing {
            Pricing::CleanPrice(price) => price,
            Pricing::YieldToMaturity(y) => self
                .time_to_payments(day_count)
                .iter()
                .map(|(t, amount)| amount * Compounding::Annual.discount_factor(y, *t))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::daycounts::Act365Fixed;

    fn settle() -> Date {
        Date::from_ymd(2025, 8, 22).unwrap()
    }

    fn two_year_par_bond() -> FixedRateBullet {
        FixedRateBullet::new(
            settle(),
            Date::from_ymd(2027, 8, 22).unwrap(),
            3.79,
            Frequency::SemiAnnual,
            Pricing::CleanPrice(100.0),
            settle(),
        )
        .unwrap()
    }

    #[test]
    fn test_semiannual_schedule() {
        let flows = two_year_par_bond().cash_flows();
        assert_eq!(flows.len(), 4);
        assert_eq!(flows[0].date(), Date::from_ymd(2026, 2, 22).unwrap());
        assert_eq!(flows[3].date(), Date::from_ymd(2027, 8, 22).unwrap());
        assert_eq!(flows[0].kind(), CashFlowKind::Coupon);
        assert_eq!(flows[3].kind(), CashFlowKind::CouponAndPrincipal);
        assert_relative_eq!(flows[0].amount_f64(), 1.895, epsilon = 1e-12);
        assert_relative_eq!(flows[3].amount_f64(), 101.895, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_coupon_single_flow() {
        let bond = FixedRateBullet::new(
            settle(),
            Date::from_ymd(2026, 8, 22).unwrap(),
            0.0,
            Frequency::Zero,
            Pricing::YieldToMaturity(0.0395),
            settle(),
        )
        .unwrap();
        let flows = bond.cash_flows();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].kind(), CashFlowKind::Principal);
        assert_relative_eq!(flows[0].amount_f64(), 100.0);
    }

    #[test]
    fn test_price_from_yield_zero_coupon() {
        let bond = FixedRateBullet::new(
            settle(),
            Date::from_ymd(2026, 8, 22).unwrap(),
            0.0,
            Frequency::Zero,
            Pricing::YieldToMaturity(0.0395),
            settle(),
        )
        .unwrap();
        let price = bond.clean_price(&Act365Fixed);
        // One flow of 100 discounted at 3.95% annual effective over 365/365
        assert_relative_eq!(price, 100.0 / 1.0395, epsilon = 1e-10);
    }

    #[test]
    fn test_price_quote_passthrough() {
        assert_relative_eq!(two_year_par_bond().clean_price(&Act365Fixed), 100.0);
    }

    #[test]
    fn test_time_to_payments_ordered() {
        let times = two_year_par_bond().time_to_payments(&Act365Fixed);
        assert_eq!(times.len(), 4);
        assert!(times.windows(2).all(|w| w[0].0 < w[1].0));
        assert_relative_eq!(times[3].0, 730.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_construction_rejects_bad_dates() {
        let result = FixedRateBullet::new(
            settle(),
            settle(),
            0.0,
            Frequency::Zero,
            Pricing::CleanPrice(100.0),
            settle(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_construction_rejects_coupon_on_zero_frequency() {
        let result = FixedRateBullet::new(
            settle(),
            Date::from_ymd(2026, 8, 22).unwrap(),
            4.0,
            Frequency::Zero,
            Pricing::CleanPrice(100.0),
            settle(),
        );
        assert!(matches!(result, Err(BondError::Construction { .. })));
    }

    #[test]
    fn test_construction_rejects_non_positive_price() {
        let result = FixedRateBullet::new(
            settle(),
            Date::from_ymd(2026, 8, 22).unwrap(),
            0.0,
            Frequency::Zero,
            Pricing::CleanPrice(0.0),
            settle(),
        );
        assert!(matches!(result, Err(BondError::Pricing { .. })));
    }

    #[test]
    fn test_serde_roundtrip() {
        let bond = two_year_par_bond();
        let json = serde_json::to_string(&bond).unwrap();
        let back: FixedRateBullet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bond);
    }
}
