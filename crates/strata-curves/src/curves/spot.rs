//! Bond-driven bootstrapped curves.

use std::sync::Arc;

use serde_json::{json, Value};

use strata_bonds::FixedRateBullet;
use strata_core::daycounts::DayCount;
use strata_core::types::Date;

use crate::bootstrap::{BootstrapInstrument, Bootstrapper};
use crate::conventions::DayCountSpec;
use crate::curves::ZeroRateCurve;
use crate::error::{CurveError, CurveResult};
use crate::serialize::{field_date, field_pairs, pairs_value};
use crate::traits::{check_horizon, Curve};

/// A zero-rate curve bootstrapped from a bond collection.
///
/// Each bond contributes one pillar at its maturity, solved in ascending
/// maturity order by the shared [`Bootstrapper`]: a single-flow bond pins
/// its pillar at the annual effective rate implied by its price, a coupon
/// bond is solved at its clean price. `get_rate` IS the bootstrapped zero
/// rate here, unlike [`ParCurve`](crate::curves::ParCurve) whose rate axis
/// is the par quotes.
///
/// Alternatively the curve can be built directly from precomputed zero
/// rates, bypassing the bootstrap (fixture reuse, deserialization).
///
/// # Example
///
/// ```rust
/// use strata_bonds::{FixedRateBullet, Pricing};
/// use strata_core::types::{Date, Frequency};
/// use strata_curves::prelude::*;
///
/// let settle = Date::from_ymd(2025, 8, 22).unwrap();
/// let bond = FixedRateBullet::new(
///     settle,
///     Date::from_ymd(2026, 8, 22).unwrap(),
///     0.0,
///     Frequency::Zero,
///     Pricing::YieldToMaturity(0.0395),
///     settle,
/// )
/// .unwrap();
/// let curve = SpotCurve::builder(settle).add_bond(bond).build().unwrap();
/// assert!((curve.get_rate(1.0).unwrap() - 0.0395).abs() < 1e-10);
/// ```
#[derive(Clone)]
pub struct SpotCurve {
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
    bonds: Vec<FixedRateBullet>,
    zeros: ZeroRateCurve,
}

impl SpotCurve {
    /// Starts a builder at the given curve date.
    #[must_use]
    pub fn builder(curve_date: Date) -> SpotCurveBuilder {
        SpotCurveBuilder {
            curve_date,
            bonds: Vec::new(),
            zero_rates: Vec::new(),
            day_count: DayCountSpec::default(),
        }
    }

    /// Returns the input bonds, ascending by maturity.
    pub fn bonds(&self) -> &[FixedRateBullet] {
        &self.bonds
    }

    /// Returns the bootstrapped zero rate curve.
    pub fn zero_rates(&self) -> &ZeroRateCurve {
        &self.zeros
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// When the payload carries `zero_rates` (it always does after
    /// [`as_dict`](Curve::as_dict)) the bootstrap is not re-run; the bonds
    /// are kept for reference.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or mistyped fields.
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        let mut builder = Self::builder(field_date(value, "curve_date")?).day_count(
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        );
        if let Some(bonds_value) = value.get("bonds").filter(|v| !v.is_null()) {
            let bonds: Vec<FixedRateBullet> = serde_json::from_value(bonds_value.clone())
                .map_err(|e| CurveError::serialization(format!("malformed bonds: {e}")))?;
            builder = builder.bonds(bonds);
        }
        if value.get("zero_rates").filter(|v| !v.is_null()).is_some() {
            builder = builder.zero_rates(field_pairs(value, "zero_rates")?);
        }
        builder.build()
    }
}

impl Curve for SpotCurve {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        check_horizon(t)?;
        self.zeros.zero_rate(t)
    }

    fn type_tag(&self) -> &'static str {
        "spot"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "bonds": serde_json::to_value(&self.bonds).unwrap_or(Value::Null),
            "zero_rates": pairs_value(self.zeros.zero_rates()),
        })
    }
}

impl std::fmt::Debug for SpotCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotCurve")
            .field("curve_date", &self.curve_date)
            .field("bonds", &self.bonds.len())
            .finish()
    }
}

/// Builder for [`SpotCurve`].
///
/// Requires at least one of a bond collection or precomputed zero rates;
/// when both are given the zero rates win and the bootstrap is skipped.
#[derive(Debug)]
pub struct SpotCurveBuilder {
    curve_date: Date,
    bonds: Vec<FixedRateBullet>,
    zero_rates: Vec<(f64, f64)>,
    day_count: DayCountSpec,
}

impl SpotCurveBuilder {
    /// Adds a single bond.
    #[must_use]
    pub fn add_bond(mut self, bond: FixedRateBullet) -> Self {
        self.bonds.push(bond);
        self
    }

    /// Adds multiple bonds.
    #[must_use]
    pub fn bonds(mut self, bonds: impl IntoIterator<Item = FixedRateBullet>) -> Self {
        self.bonds.extend(bonds);
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
    /// Returns a construction error when neither bonds nor zero rates are
    /// provided, when a bond settles away from the curve date, or when a
    /// bootstrap solve fails.
    pub fn build(self) -> CurveResult<SpotCurve> {
        let day_count = self.day_count.resolve()?;

        if self.bonds.is_empty() && self.zero_rates.is_empty() {
            return Err(CurveError::construction(
                "either bonds or precomputed zero rates must be provided",
            ));
        }

        let mut bonds = self.bonds;
        bonds.sort_by_key(|bond| bond.maturity());

        let pillars = if self.zero_rates.is_empty() {
            let instruments = bonds
                .iter()
                .map(|bond| instrument_from_bond(self.curve_date, day_count.as_ref(), bond))
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

        Ok(SpotCurve {
            curve_date: self.curve_date,
            day_count,
            bonds,
            zeros,
        })
    }
}

/// Maps a bond onto a bootstrap instrument.
///
/// The bond's settlement must equal the curve date, so its time axis and
/// the curve's agree. A single-flow bond yields a direct zero pillar at
/// the annual effective rate implied by its price; a coupon bond becomes a
/// solve at its clean price.
fn instrument_from_bond(
    curve_date: Date,
    day_count: &dyn DayCount,
    bond: &FixedRateBullet,
) -> CurveResult<BootstrapInstrument> {
    if bond.settlement_date() != curve_date {
        return Err(CurveError::construction(format!(
            "bond maturing {} settles on {}, not on the curve date {}",
            bond.maturity(),
            bond.settlement_date(),
            curve_date
        )));
    }

    let price = bond.clean_price(day_count);
    let flows = bond.time_to_payments(day_count);
    let label = format!("bond {}", bond.maturity());

    if flows.is_empty() {
        return Err(CurveError::construction(format!(
            "{label}: bond has no remaining cash flows"
        )));
    }
    if flows.len() == 1 {
        let (t, redemption) = flows[0];
        if price <= 0.0 || t <= 0.0 {
            return Err(CurveError::construction(format!(
                "{label}: cannot imply a zero yield from price {price} at t={t}"
            )));
        }
        let rate = (redemption / price).powf(1.0 / t) - 1.0;
        return Ok(BootstrapInstrument::zero_yield(label, t, rate));
    }

    let maturity = flows[flows.len() - 1].0;
    Ok(BootstrapInstrument::coupon_bond(label, maturity, flows, price))
}
