//! Benchmark + spread curve composition.

use std::sync::Arc;

use serde_json::{json, Value};

use strata_core::daycounts::DayCount;
use strata_core::types::{Compounding, Date};

use crate::conventions::DayCountSpec;
use crate::error::{CurveError, CurveResult};
use crate::serialize::{curve_from_dict, field};
use crate::traits::Curve;

/// A curve composed additively from a benchmark and a spread curve.
///
/// `get_rate(t)` is the benchmark rate plus the spread rate (the spread is
/// converted to the benchmark's compounding convention before the sum),
/// and `discount_t` derives from the combined rate under the benchmark's
/// compounding. Children are held as shared read-only references and must
/// agree on the curve date.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use strata_curves::prelude::*;
/// use strata_core::types::Date;
///
/// let curve_date = Date::from_ymd(2023, 1, 1).unwrap();
/// let benchmark = Arc::new(FlatCurveAer::new(0.04, curve_date, "actual/365").unwrap());
/// let spread = Arc::new(FlatCreditSpreadCurve::new(0.03, curve_date, "actual/365").unwrap());
/// let combined = CombinedCurve::new(benchmark, spread, "actual/365").unwrap();
/// assert!((combined.get_rate(1.0).unwrap() - 0.07).abs() < 1e-6);
/// ```
#[derive(Clone)]
pub struct CombinedCurve {
    benchmark: Arc<dyn Curve>,
    spread: Arc<dyn Curve>,
    curve_date: Date,
    day_count: Arc<dyn DayCount>,
}

impl CombinedCurve {
    /// Creates a combined curve over shared children.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::CurveDateMismatch`] when the children disagree
    /// on the curve date, or a type error for an unresolvable day count
    /// selector.
    pub fn new(
        benchmark: Arc<dyn Curve>,
        spread: Arc<dyn Curve>,
        day_count: impl Into<DayCountSpec>,
    ) -> CurveResult<Self> {
        if benchmark.curve_date() != spread.curve_date() {
            return Err(CurveError::CurveDateMismatch {
                benchmark: benchmark.curve_date(),
                spread: spread.curve_date(),
            });
        }
        let curve_date = benchmark.curve_date();
        Ok(Self {
            benchmark,
            spread,
            curve_date,
            day_count: day_count.into().resolve()?,
        })
    }

    /// Returns the benchmark child.
    pub fn benchmark(&self) -> Arc<dyn Curve> {
        Arc::clone(&self.benchmark)
    }

    /// Returns the spread child.
    pub fn spread(&self) -> Arc<dyn Curve> {
        Arc::clone(&self.spread)
    }

    /// Reconstructs the curve from its serialized payload.
    ///
    /// Children are rebuilt polymorphically through the type-tag registry,
    /// so any curve type can sit on either side.
    ///
    /// # Errors
    ///
    /// Returns an error for missing fields, unknown child tags, or the
    /// construction failures of [`CombinedCurve::new`].
    pub fn from_dict(value: &Value) -> CurveResult<Self> {
        let benchmark = curve_from_dict(field(value, "benchmark")?)?;
        let spread = curve_from_dict(field(value, "spread")?)?;
        Self::new(
            benchmark,
            spread,
            DayCountSpec::from_value(value.get("day_count_convention").unwrap_or(&Value::Null))?,
        )
    }
}

impl Curve for CombinedCurve {
    fn curve_date(&self) -> Date {
        self.curve_date
    }

    fn day_count(&self) -> &dyn DayCount {
        self.day_count.as_ref()
    }

    fn compounding(&self) -> Compounding {
        self.benchmark.compounding()
    }

    fn get_rate(&self, t: f64) -> CurveResult<f64> {
        let base = self.benchmark.get_rate(t)?;
        let spread = self.spread.get_rate(t)?;
        let spread = self
            .spread
            .compounding()
            .convert(spread, self.benchmark.compounding());
        Ok(base + spread)
    }

    fn type_tag(&self) -> &'static str {
        "combined"
    }

    fn as_dict(&self) -> Value {
        json!({
            "type": self.type_tag(),
            "curve_date": self.curve_date.to_string(),
            "day_count_convention": self.day_count.name(),
            "benchmark": self.benchmark.as_dict(),
            "spread": self.spread.as_dict(),
        })
    }
}

impl std::fmt::Debug for CombinedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedCurve")
            .field("curve_date", &self.curve_date)
            .field("benchmark", &self.benchmark.type_tag())
            .field("spread", &self.spread.type_tag())
            .finish()
    }
}
