//! Par-quote-driven bootstrapped curves.

use std::sync::Arc;

use serde_json::{json, Value};

use strata_core::daycounts::DayCount;
use strata_core::types::{Compounding, Date};

use crate::bootstrap::{BootstrapInstrument, Bootstrapper};
use crate::conventions::DayCountSpec;
use crate::curves::{clamped_rate, ZeroRateCurve};
use crate::error::{CurveError, CurveResult};
use crate::quotes::{QuoteKind, RateQuote};
use crate::serialize::{field_date, field_pairs, pairs_value};
use crate::traits::{check_horizon, Curve};

/// A curve bootstrapped from par quotes.
///
/// Each quote is either a directly observed zero yield or a par bond
/// (coupon, frequency, clean price). Coupon schedules are synthesized from
/// the quote's frequency — rolled backward from the resolved maturity —
/// and handed to the shared [`Bootstrapper`] in ascending maturity order.
///
/// Two distinct rate notions coexist:
///
/// - [`get_rate`](Curve::get_rate) interpolates the RAW INPUT par quotes —
///   the curve's own par-rate axis;
/// - [`discount_t`](Curve::discount_t) and
///   [`zero_rates`](ParCurve::zero_rates) come from the bootstrapped zero
///   grid. [`implied_par_rate`](ParCurve::implied_par_rate) derives the
///   alternative par-rate notion from that grid.
///
/// # Example
///
/// ```rust
/// use strata_curves::prelude::*;
/// use strata_core::types::{Date, Frequency, Tenor};
///
/// let curve = ParCurve::builder(Date::from_ymd(2025, 8, 22).unwrap())
///     .add_quote(RateQuote::zero_yield(Tenor::Years(1), 0.0395))
///     .add_quote(RateQuote::par_bond(Tenor::Years(2), 3.79, Frequency::SemiAnnual, 100.0))
///     .day_count("actual/365")
///     .build()
///     .unwrap();
/// assert!(curve.discount_t(1.0).unwrap() < 1.0);
/// ```
#[derive(Clone)]
pub struct ParCurve {
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
    quotes: Vec<RateQuote>,
    par_times: Vec<f64>,
    par_rates: Vec<f64>,
    zeros: ZeroRateCurve,
}

impl ParCurve {
    /// Starts a builder at the given curve date.
    #[must_use]
    pub fn builder(curve_date: Date) -> ParCurveBuilder {
        ParCurveBuilder {
            curve_date,
            quotes: Vec::new(),
            zero_rates: Vec::new(),
            day_count: DayCountSpec::default(),
        }
    }

    /// Returns the input quotes, ascending by maturity.
    pub fn quotes(&self) -> &[RateQuote] {
        &self.quotes
    }

    /// Returns the bootstrapped zero rate curve.
    pub fn zero_rates(&self) -> &ZeroRateCurve {
        &self.zeros
    }

    /// The par rate at horizon `t` implied by the bootstrapped zero grid.
    ///
    /// Computes the coupon rate pricing a semi-annual bond maturing at `t`
    /// exactly at face off the zero curve. For horizons inside the first
    /// coupon period the notion degenerates to the zero rate.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive or non-finite horizon.
    pub fn implied_par_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        if t <= 0.5 {
            return self.zeros.zero_rate(t);
        }
        let mut annuity = 0.0;
        let mut u = t;
        while u > 1e-9 {
            let rate = self.zeros.zero_rate(u)?;
            annuity += Compounding::Annual.discount_factor(rate, u);
            u -= 0.5;
        }
        let df_maturity =
            Compounding::Annual.discount_factor(self.zeros.zero_rate(t)?, t);
        Ok(2.0 * (1.0 - df_maturity) / annuity)
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// When the payload carries `zero_rates` (it always does after
    /// [`as_dict`](Curve::as_dict)) the bootstrap is not re-run; the quotes
    /// are kept as the par-rate axis.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or mistyped fields.
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        let mut builder = Self::builder(field_date(value, "curve_date")?).day_count(
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        );
        if let Some(quotes_value) = value.get("par_quotes").filter(|v| !v.is_null()) {
            let quotes: Vec<RateQuote> = serde_json::from_value(quotes_value.clone())
                .map_err(|e| CurveError::serialization(format!("malformed par_quotes: {e}")))?;
            builder = builder.quotes(quotes);
        }
        if value.get("zero_rates").filter(|v| !v.is_null()).is_some() {
            builder = builder.zero_rates(field_pairs(value, "zero_rates")?);
        }
        builder.build()
    }
}

impl Curve for ParCurve {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        if self.par_times.is_empty() {
            // Built from precomputed zero rates alone: the par axis
            // degenerates to the zero curve
            return self.zeros.zero_rate(t);
        }
        clamped_rate(&self.par_times, &self.par_rates, t)
    }

    fn discount_t(&self, t: f64) -> CurveResult<f64> {
        self.zeros.discount_t(t)
    }

    fn type_tag(&self) -> &'static str {
        "par"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "par_quotes": serde_json::to_value(&self.quotes).unwrap_or(Value::Null),
            "zero_rates": pairs_value(self.zeros.zero_rates()),
        })
    }
}

impl std::fmt::Debug for ParCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParCurve")
            .field("curve_date", &self.curve_date)
            .field("quotes", &self.quotes.len())
            .field("pillars", &self.par_times.len())
            .finish()
    }
}

/// Builder for [`ParCurve`].
///
/// Requires at least one of a quote set or precomputed zero rates; when
/// both are given the zero rates win and the bootstrap is skipped.
#[derive(Debug)]
pub struct ParCurveBuilder {
    curve_date: Date,
    quotes: Vec<RateQuote>,
    zero_rates: Vec<(f64, f64)>,
    day_count: DayCountSpec,
}

impl ParCurveBuilder {
    /// Adds a single quote.
    #[must_use]
    pub fn add_quote(mut self, quote: RateQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Adds multiple quotes.
    #[must_use]
    pub fn quotes(mut self, quotes: impl IntoIterator<Item = RateQuote>) -> Self {
        self.quotes.extend(quotes);
        self
    }

    /// Supplies precomputed zero rate pillars, bypassing the bootstrap.
    #[must_use]
    pub fn zero_rates(mut self, rates: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.zero_rates.extend(rates);
        self
    }

    /// Selects the day count convention.
    #[must_use]
    pub fn day_count(mut self, day_count: impl Into<DayCountSpec>) -> Self {
        self.day_count = day_count.into();
        self
    }

    /// Builds the curve, bootstrapping unless zero rates were supplied.
    ///
    /// # Errors
    ///
    /// Returns a construction error when neither quotes nor zero rates are
    /// provided, when a quote is invalid, or when a bootstrap solve fails.
    pub fn build(self) -> CurveResult<ParCurve> {
        let day_count = self.day_count.resolve()?;

        if self.quotes.is_empty() && self.zero_rates.is_empty() {
            return Err(CurveError::construction(
                "either par quotes or precomputed zero rates must be provided",
            ));
        }

        // Resolve quote maturities onto the time axis, ascending
        let mut resolved: Vec<(f64, RateQuote)> = Vec::with_capacity(self.quotes.len());
        for quote in &self.quotes {
            quote.validate()?;
            let maturity_date = quote.maturity.resolve(self.curve_date)?;
            let t = day_count.year_fraction_f64(self.curve_date, maturity_date);
            if t <= 0.0 {
                return Err(CurveError::construction(format!(
                    "quote maturity {} does not fall after the curve date {}",
                    quote.maturity, self.curve_date
                )));
            }
            resolved.push((t, *quote));
        }
        resolved.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let par_pairs: Vec<(f64, f64)> = resolved
            .iter()
            .map(|(t, quote)| {
                let rate = match quote.kind {
                    QuoteKind::ZeroYield { rate } => rate,
                    QuoteKind::ParBond { coupon, .. } => coupon / 100.0,
                };
                (*t, rate)
            })
            .collect();
        let (par_times, par_rates) = if par_pairs.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            crate::curves::prepare_pillars(par_pairs, "par quote")?
        };

        let pillars = if self.zero_rates.is_empty() {
            let instruments = resolved
                .iter()
                .map(|(t, quote)| instrument_from_quote(self.curve_date, day_count.as_ref(), *t, quote))
                .collect::<CurveResult<Vec<_>>>()?;
            Bootstrapper::new(instruments)?.run()?
        } else {
            self.zero_rates
        };

        let zeros = ZeroRateCurve::new(
            self.curve_date,
            pillars,
            DayCountSpec::from(Arc::clone(&day_count)),
        )?;

        let mut quotes = self.quotes;
        quotes.sort_by(|a, b| {
            let ta = a.maturity.resolve(self.curve_date).map(|d| self.curve_date.days_between(&d));
            let tb = b.maturity.resolve(self.curve_date).map(|d| self.curve_date.days_between(&d));
            ta.unwrap_or(i64::MAX).cmp(&tb.unwrap_or(i64::MAX))
        });

        Ok(ParCurve {
            curve_date: self.curve_date,
            day_count,
            quotes,
            par_times,
            par_rates,
            zeros,
        })
    }
}

/// Maps a par quote onto a bootstrap instrument, synthesizing the coupon
/// schedule for par bond quotes.
fn instrument_from_quote(
    curve_date: Date,
    day_count: &dyn DayCount,
    maturity: f64,
    quote: &RateQuote,
) -> CurveResult<BootstrapInstrument> {
    match quote.kind {
        QuoteKind::ZeroYield { rate } => Ok(BootstrapInstrument::zero_yield(
            format!("zero {}", quote.maturity),
            maturity,
            rate,
        )),
        QuoteKind::ParBond {
            coupon,
            frequency,
            clean_price,
        } => {
            let maturity_date = quote.maturity.resolve(curve_date)?;
            let step = frequency.months_per_period() as i32;

            let mut dates = Vec::new();
            let mut k = 0;
            while let Ok(date) = maturity_date.add_months(-k * step) {
                if date <= curve_date {
                    break;
                }
                dates.push(date);
                k += 1;
            }
            dates.reverse();

            let per_period = coupon / f64::from(frequency.periods_per_year());
            let last = dates.len() - 1;
            let cash_flows: Vec<(f64, f64)> = dates
                .iter()
                .enumerate()
                .map(|(i, date)| {
                    let t = day_count.year_fraction_f64(curve_date, *date);
                    let amount = if i == last {
                        per_period + 100.0
                    } else {
                        per_period
                    };
                    (t, amount)
                })
                .collect();

            Ok(BootstrapInstrument::coupon_bond(
                format!("par {} @ {}", quote.maturity, clean_price),
                maturity,
                cash_flows,
                clean_price,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::types::{Frequency, Tenor};

    fn curve_date() -> Date {
        Date::from_ymd(2025, 8, 22).unwrap()
    }

    fn two_point_curve() -> ParCurve {
        ParCurve::builder(curve_date())
            .add_quote(RateQuote::zero_yield(Tenor::Years(1), 0.0395))
            .add_quote(RateQuote::par_bond(
                Tenor::Years(2),
                3.79,
                Frequency::SemiAnnual,
                100.0,
            ))
            .day_count("actual/365")
            .build()
            .unwrap()
    }

    #[test]
    fn test_neither_input_rejected() {
        let result = ParCurve::builder(curve_date()).build();
        assert!(matches!(result, Err(CurveError::Construction { .. })));
    }

    #[test]
    fn test_get_rate_interpolates_input_quotes() {
        let curve = two_point_curve();
        let t1 = curve.zeros.zero_rates().next().unwrap().0;
        // At the quoted pillars, get_rate returns the raw quote levels
        assert_relative_eq!(curve.get_rate(t1).unwrap(), 0.0395, epsilon = 1e-12);
        assert_relative_eq!(curve.get_rate(30.0).unwrap(), 0.0379, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_comes_from_zero_grid() {
        let curve = two_point_curve();
        let df = curve.discount_t(1.0).unwrap();
        assert!(df > 0.0 && df < 1.0);
        // The 1Y pillar is a direct zero yield: df must match it exactly
        let t1 = curve.zeros.zero_rates().next().unwrap().0;
        assert_relative_eq!(
            curve.discount_t(t1).unwrap(),
            1.0395f64.powf(-t1),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_par_bond_reprices_off_zero_grid() {
        let curve = two_point_curve();
        // Rebuild the 2Y par bond flows and discount them off the curve
        let maturity_date = Tenor::Years(2).resolve(curve_date()).unwrap();
        let mut pv = 0.0;
        for k in 0..4 {
            let date = maturity_date.add_months(-6 * k).unwrap();
            let t = curve.day_count().year_fraction_f64(curve_date(), date);
            let amount = if k == 0 { 101.895 } else { 1.895 };
            pv += amount * curve.discount_t(t).unwrap();
        }
        assert_relative_eq!(pv, 100.0, epsilon = 1e-7);
    }

    #[test]
    fn test_implied_par_rate_on_flat_curve() {
        // A flat zero curve implies a par rate just below the zero rate
        let curve = ParCurve::builder(curve_date())
            .zero_rates(vec![(0.5, 0.05), (10.0, 0.05)])
            .day_count("actual/365")
            .build()
            .unwrap();
        let par = curve.implied_par_rate(5.0).unwrap();
        assert!(par > 0.048 && par < 0.05, "implied par {par}");
    }

    #[test]
    fn test_implied_par_differs_from_input_par_axis() {
        let curve = two_point_curve();
        let t2 = curve.zeros.max_time();
        let implied = curve.implied_par_rate(t2).unwrap();
        let quoted = curve.get_rate(t2).unwrap();
        // Both are par-rate notions for the same maturity; they agree to a
        // few basis points but are not the same number
        assert!((implied - quoted).abs() < 5e-4);
    }

    #[test]
    fn test_from_zero_rates_only() {
        let curve = ParCurve::builder(curve_date())
            .zero_rates(vec![(1.0, 0.04), (2.0, 0.045)])
            .day_count("actual/365")
            .build()
            .unwrap();
        // Par axis degenerates to the zero curve
        assert_relative_eq!(curve.get_rate(1.0).unwrap(), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_quote_at_curve_date_rejected() {
        let result = ParCurve::builder(curve_date())
            .add_quote(RateQuote::zero_yield(Tenor::Date(curve_date()), 0.04))
            .build();
        assert!(result.is_err());
    }
}
