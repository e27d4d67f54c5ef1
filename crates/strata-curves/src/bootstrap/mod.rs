//! Sequential curve bootstrapping.
//!
//! The bootstrapper turns an ordered set of market instruments into a
//! self-consistent zero-rate term structure, strictly in ascending maturity
//! order: solving the pillar at `t_i` uses only pillars at `t < t_i`, never
//! look-ahead. A zero-yield quote is adopted directly; a coupon instrument
//! is solved for the one unknown rate that reprices it to its clean price.

use strata_core::types::Compounding;
use strata_math::solvers::{newton_with_fallback, SolverConfig};
use strata_math::MathError;

use crate::curves::clamped_rate;
use crate::error::{CurveError, CurveResult};

/// Times closer than this are the same pillar.
const TIME_EPS: f64 = 1e-9;

/// The lowest zero rate a solve may produce.
const RATE_FLOOR: f64 = -0.9;

/// The highest zero rate a solve may produce.
const RATE_CAP: f64 = 20.0;

/// One instrument in the bootstrap set.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapInstrument {
    label: String,
    maturity: f64,
    kind: InstrumentKind,
}

/// The shape of a bootstrap instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentKind {
    /// A direct zero yield observation; adopted as the pillar rate without
    /// a solve.
    ZeroYield {
        /// Annual effective zero yield.
        rate: f64,
    },
    /// A coupon instrument priced at a known clean price; solved for the
    /// zero rate at its maturity.
    CouponBond {
        /// Ordered `(year fraction, amount)` cash flows, the last at the
        /// instrument maturity.
        cash_flows: Vec<(f64, f64)>,
        /// Clean price per 100 of face value.
        clean_price: f64,
    },
}

impl BootstrapInstrument {
    /// Creates a zero yield pillar instrument.
    #[must_use]
    pub fn zero_yield(label: impl Into<String>, maturity: f64, rate: f64) -> Self {
        Self {
            label: label.into(),
            maturity,
            kind: InstrumentKind::ZeroYield { rate },
        }
    }

    /// Creates a coupon instrument to be solved at a clean price.
    #[must_use]
    pub fn coupon_bond(
        label: impl Into<String>,
        maturity: f64,
        cash_flows: Vec<(f64, f64)>,
        clean_price: f64,
    ) -> Self {
        Self {
            label: label.into(),
            maturity,
            kind: InstrumentKind::CouponBond {
                cash_flows,
                clean_price,
            },
        }
    }

    /// Returns the instrument's description.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the instrument's maturity in years.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    fn validate(&self) -> CurveResult<()> {
        if !self.maturity.is_finite() || self.maturity <= 0.0 {
            return Err(CurveError::construction(format!(
                "{}: maturity must be positive, got {}",
                self.label, self.maturity
            )));
        }
        match &self.kind {
            InstrumentKind::ZeroYield { rate } => {
                if !rate.is_finite() || *rate <= -1.0 {
                    return Err(CurveError::construction(format!(
                        "{}: zero yield must be above -100%, got {rate}",
                        self.label
                    )));
                }
            }
            InstrumentKind::CouponBond {
                cash_flows,
                clean_price,
            } => {
                if !clean_price.is_finite() || *clean_price <= 0.0 {
                    return Err(CurveError::construction(format!(
                        "{}: clean price must be positive, got {clean_price}",
                        self.label
                    )));
                }
                if cash_flows.is_empty() {
                    return Err(CurveError::construction(format!(
                        "{}: coupon instrument has no cash flows",
                        self.label
                    )));
                }
                if cash_flows.windows(2).any(|w| w[1].0 <= w[0].0) {
                    return Err(CurveError::construction(format!(
                        "{}: cash flow times must be strictly increasing",
                        self.label
                    )));
                }
                let last = cash_flows[cash_flows.len() - 1];
                if (last.0 - self.maturity).abs() > TIME_EPS {
                    return Err(CurveError::construction(format!(
                        "{}: final cash flow at t={} does not fall on the maturity t={}",
                        self.label, last.0, self.maturity
                    )));
                }
                if last.1 <= 0.0 {
                    return Err(CurveError::construction(format!(
                        "{}: redemption cash flow must be positive, got {}",
                        self.label, last.1
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Sequential bootstrapper for zero-rate curves.
///
/// Instruments are sorted by maturity at construction and consumed one at
/// a time by [`solve_next`](Bootstrapper::solve_next); [`run`](Bootstrapper::run)
/// drains the whole set. A failed solve fails the construction — no
/// partially populated grid is ever returned.
///
/// # Example
///
/// ```rust
/// use strata_curves::bootstrap::{Bootstrapper, BootstrapInstrument};
///
/// let mut bootstrapper = Bootstrapper::new(vec![
///     BootstrapInstrument::zero_yield("1Y zero", 1.0, 0.0395),
///     BootstrapInstrument::coupon_bond(
///         "2Y par",
///         2.0,
///         vec![(0.5, 1.895), (1.0, 1.895), (1.5, 1.895), (2.0, 101.895)],
///         100.0,
///     ),
/// ])
/// .unwrap();
///
/// let (t, rate) = bootstrapper.solve_next().unwrap();
/// assert_eq!(t, 1.0);
/// assert_eq!(rate, 0.0395);
/// ```
#[derive(Debug)]
pub struct Bootstrapper {
    instruments: Vec<BootstrapInstrument>,
    next: usize,
    pillars: Vec<(f64, f64)>,
    config: SolverConfig,
}

impl Bootstrapper {
    /// Creates a bootstrapper over a set of instruments.
    ///
    /// # Errors
    ///
    /// Returns a construction error for an empty set, an invalid
    /// instrument, or two instruments at the same maturity.
    pub fn new(mut instruments: Vec<BootstrapInstrument>) -> CurveResult<Self> {
        if instruments.is_empty() {
            return Err(CurveError::construction(
                "no instruments provided for bootstrap",
            ));
        }
        for instrument in &instruments {
            instrument.validate()?;
        }
        instruments.sort_by(|a, b| {
            a.maturity
                .partial_cmp(&b.maturity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(w) = instruments
            .windows(2)
            .find(|w| w[1].maturity - w[0].maturity < TIME_EPS)
        {
            return Err(CurveError::construction(format!(
                "instruments '{}' and '{}' share the maturity t={}",
                w[0].label, w[1].label, w[0].maturity
            )));
        }
        Ok(Self {
            instruments,
            next: 0,
            pillars: Vec::new(),
            config: SolverConfig::default().with_tolerance(1e-10),
        })
    }

    /// Overrides the solver configuration (tolerance, iteration budget).
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the number of instruments not yet solved.
    pub fn remaining(&self) -> usize {
        self.instruments.len() - self.next
    }

    /// Returns the pillars solved so far, ascending in time.
    pub fn pillars(&self) -> &[(f64, f64)] {
        &self.pillars
    }

    /// Solves the next maturity and returns the new `(t, zero rate)` pillar.
    ///
    /// # Errors
    ///
    /// Returns a construction error when no maturity remains to solve, and
    /// a convergence error when the root-finder fails for a coupon
    /// instrument.
    pub fn solve_next(&mut self) -> CurveResult<(f64, f64)> {
        let instrument = self.instruments.get(self.next).ok_or_else(|| {
            CurveError::construction("no maturity remains to solve; the bootstrap is complete")
        })?;

        let rate = match &instrument.kind {
            InstrumentKind::ZeroYield { rate } => *rate,
            InstrumentKind::CouponBond {
                cash_flows,
                clean_price,
            } => solve_coupon_rate(
                &self.pillars,
                instrument.maturity,
                cash_flows,
                *clean_price,
                &instrument.label,
                &self.config,
            )?,
        };

        if !rate.is_finite() || rate <= -1.0 {
            return Err(CurveError::construction(format!(
                "{}: solved zero rate {rate} is outside the valid domain",
                instrument.label
            )));
        }

        log::debug!(
            "bootstrap pillar solved: {} -> z({}) = {:.6}",
            instrument.label,
            instrument.maturity,
            rate
        );
        self.pillars.push((instrument.maturity, rate));
        self.next += 1;
        Ok((instrument.maturity, rate))
    }

    /// Solves every remaining maturity and returns the full pillar grid.
    ///
    /// # Errors
    ///
    /// Propagates the first failed solve; no partial grid escapes.
    pub fn run(mut self) -> CurveResult<Vec<(f64, f64)>> {
        while self.remaining() > 0 {
            self.solve_next()?;
        }
        Ok(self.pillars)
    }
}

/// Present value of one unit at `t` off a zero grid, flat beyond its ends.
fn grid_discount(pillars: &[(f64, f64)], t: f64) -> CurveResult<f64> {
    let times: Vec<f64> = pillars.iter().map(|p| p.0).collect();
    let rates: Vec<f64> = pillars.iter().map(|p| p.1).collect();
    let rate = clamped_rate(&times, &rates, t)?;
    Ok(Compounding::Annual.discount_factor(rate, t))
}

/// Solves the zero rate at `maturity` that reprices a coupon instrument.
///
/// Flows at or before the last solved pillar are present-valued off the
/// solved grid once; the unknown rate only enters the discounting of the
/// remaining flows, through a candidate pillar `(maturity, r)` appended to
/// the grid. The price is monotone decreasing in `r`, so the root is
/// unique when it exists.
fn solve_coupon_rate(
    pillars: &[(f64, f64)],
    maturity: f64,
    cash_flows: &[(f64, f64)],
    clean_price: f64,
    label: &str,
    config: &SolverConfig,
) -> CurveResult<f64> {
    let last_solved = pillars.last().map(|p| p.0);

    let mut known_pv = 0.0;
    let mut open_flows: Vec<(f64, f64)> = Vec::new();
    for &(t, amount) in cash_flows {
        match last_solved {
            Some(solved) if t <= solved + TIME_EPS => {
                known_pv += amount * grid_discount(pillars, t)?;
            }
            _ => open_flows.push((t, amount)),
        }
    }

    if open_flows.is_empty() {
        return Err(CurveError::construction(format!(
            "{label}: no cash flow remains beyond the solved maturities"
        )));
    }

    let residual = |r: f64| -> f64 {
        let mut grid: Vec<(f64, f64)> = Vec::with_capacity(pillars.len() + 1);
        grid.extend_from_slice(pillars);
        grid.push((maturity, r));
        let pv: f64 = open_flows
            .iter()
            .map(|&(t, amount)| {
                // grid is sorted and non-empty, so this cannot fail
                amount * grid_discount(&grid, t).unwrap_or(f64::NAN)
            })
            .sum();
        known_pv + pv - clean_price
    };

    let guess = initial_guess(&open_flows, clean_price - known_pv);
    let bracket = expand_bracket(&residual, RATE_FLOOR, 1.0);

    match newton_with_fallback(&residual, guess, bracket, config) {
        Ok(result) => {
            if result.root < RATE_FLOOR || result.root > RATE_CAP {
                return Err(CurveError::construction(format!(
                    "{label}: no admissible zero rate reprices the quoted price \
                     (solved {:.4}, admissible range [{RATE_FLOOR}, {RATE_CAP}])",
                    result.root
                )));
            }
            log::trace!(
                "{label}: solved in {} iterations, residual {:.2e}",
                result.iterations,
                result.residual
            );
            Ok(result.root)
        }
        Err(MathError::ConvergenceFailed {
            iterations,
            residual,
        }) => Err(CurveError::convergence(label, iterations, residual)),
        Err(MathError::InvalidBracket { fa, .. }) => {
            Err(CurveError::convergence(label, 0, fa))
        }
        Err(err) => Err(err.into()),
    }
}

/// First guess for the unknown rate: the internal growth rate implied by
/// the open cash flows against the price left to explain, using the
/// cash-flow-weighted mean time as the horizon.
fn initial_guess(open_flows: &[(f64, f64)], target_pv: f64) -> f64 {
    let total: f64 = open_flows.iter().map(|f| f.1).sum();
    if target_pv <= 0.0 || total <= 0.0 {
        return 0.05;
    }
    let weighted_time: f64 = open_flows.iter().map(|&(t, cf)| t * cf).sum::<f64>() / total;
    if weighted_time <= 0.0 {
        return 0.05;
    }
    let guess = (total / target_pv).powf(1.0 / weighted_time) - 1.0;
    guess.clamp(RATE_FLOOR + 0.1, 1.0)
}

/// Widens the upper end of `[lo, hi]` until the residual changes sign.
///
/// The residual is decreasing in the rate and large positive near the rate
/// floor, so only the upper end ever needs to move.
fn expand_bracket<F: Fn(f64) -> f64>(f: &F, lo: f64, mut hi: f64) -> (f64, f64) {
    while f(hi) > 0.0 && hi < RATE_CAP {
        hi *= 2.0;
    }
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_set_rejected() {
        let result = Bootstrapper::new(vec![]);
        assert!(matches!(result, Err(CurveError::Construction { .. })));
    }

    #[test]
    fn test_zero_yield_adopted_directly() {
        let mut bootstrapper = Bootstrapper::new(vec![BootstrapInstrument::zero_yield(
            "6M zero", 0.5, 0.0414,
        )])
        .unwrap();
        let (t, rate) = bootstrapper.solve_next().unwrap();
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(rate, 0.0414);
    }

    #[test]
    fn test_solve_next_exhausted_fails() {
        let mut bootstrapper = Bootstrapper::new(vec![BootstrapInstrument::zero_yield(
            "6M zero", 0.5, 0.0414,
        )])
        .unwrap();
        bootstrapper.solve_next().unwrap();
        let result = bootstrapper.solve_next();
        assert!(matches!(result, Err(CurveError::Construction { .. })));
    }

    #[test]
    fn test_instruments_sorted_by_maturity() {
        let pillars = Bootstrapper::new(vec![
            BootstrapInstrument::zero_yield("2Y", 2.0, 0.05),
            BootstrapInstrument::zero_yield("1Y", 1.0, 0.04),
        ])
        .unwrap()
        .run()
        .unwrap();
        assert_eq!(pillars, vec![(1.0, 0.04), (2.0, 0.05)]);
    }

    #[test]
    fn test_duplicate_maturity_rejected() {
        let result = Bootstrapper::new(vec![
            BootstrapInstrument::zero_yield("1Y a", 1.0, 0.04),
            BootstrapInstrument::zero_yield("1Y b", 1.0, 0.05),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_coupon_flows_must_reach_maturity() {
        let result = Bootstrapper::new(vec![BootstrapInstrument::coupon_bond(
            "broken 2Y",
            2.0,
            vec![(0.5, 2.0), (1.0, 102.0)],
            100.0,
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flat_par_ladder_recovers_flat_zero_curve() {
        // On a flat 5% annual world, a 1Y zero at 5% and a 2Y annual-pay
        // 5% coupon bond at par must bootstrap to exactly 5% at both pillars.
        let pillars = Bootstrapper::new(vec![
            BootstrapInstrument::zero_yield("1Y zero", 1.0, 0.05),
            BootstrapInstrument::coupon_bond(
                "2Y par 5%",
                2.0,
                vec![(1.0, 5.0), (2.0, 105.0)],
                100.0,
            ),
        ])
        .unwrap()
        .run()
        .unwrap();
        assert_relative_eq!(pillars[0].1, 0.05, epsilon = 1e-9);
        assert_relative_eq!(pillars[1].1, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_known_two_step_bootstrap() {
        // 1Y zero at 4%; 2Y annual 6% coupon bond priced at par.
        // Hand-solving 6/1.04 + 106/(1+z)^2 = 100 gives
        // z = sqrt(106 / (100 - 6/1.04)) - 1.
        let pillars = Bootstrapper::new(vec![
            BootstrapInstrument::zero_yield("1Y zero", 1.0, 0.04),
            BootstrapInstrument::coupon_bond(
                "2Y par 6%",
                2.0,
                vec![(1.0, 6.0), (2.0, 106.0)],
                100.0,
            ),
        ])
        .unwrap()
        .run()
        .unwrap();
        let expected = (106.0_f64 / (100.0 - 6.0 / 1.04)).sqrt() - 1.0;
        assert_relative_eq!(pillars[1].1, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_first_instrument_may_be_coupon_bond() {
        // With no solved pillars, every flow discounts at the candidate rate
        let pillars = Bootstrapper::new(vec![BootstrapInstrument::coupon_bond(
            "2Y par 5%",
            2.0,
            vec![(1.0, 5.0), (2.0, 105.0)],
            100.0,
        )])
        .unwrap()
        .run()
        .unwrap();
        assert_relative_eq!(pillars[0].1, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_unpriceable_bond_fails_convergence() {
        // Price far above the sum of cash flows: no rate above the floor
        // can reprice it, so the bracket never brackets a root.
        let result = Bootstrapper::new(vec![BootstrapInstrument::coupon_bond(
            "absurd 1Y",
            1.0,
            vec![(1.0, 101.0)],
            100_000.0,
        )])
        .unwrap()
        .run();
        assert!(matches!(
            result,
            Err(CurveError::Convergence { .. }) | Err(CurveError::Construction { .. })
        ));
    }

    #[test]
    fn test_off_grid_coupon_times_interpolate() {
        // 18M coupon of the 2Y bond lies between the 1Y pillar and the
        // candidate 2Y pillar; the solve must still converge and the
        // resulting curve must reprice the bond.
        let instruments = vec![
            BootstrapInstrument::zero_yield("1Y zero", 1.0, 0.04),
            BootstrapInstrument::coupon_bond(
                "2Y semi 5%",
                2.0,
                vec![(0.5, 2.5), (1.0, 2.5), (1.5, 2.5), (2.0, 102.5)],
                101.0,
            ),
        ];
        let pillars = Bootstrapper::new(instruments.clone()).unwrap().run().unwrap();

        // Reprice off the final grid
        let pv: f64 = [(0.5, 2.5), (1.0, 2.5), (1.5, 2.5), (2.0, 102.5)]
            .iter()
            .map(|&(t, cf)| cf * grid_discount(&pillars, t).unwrap())
            .sum();
        assert_relative_eq!(pv, 101.0, epsilon = 1e-7);
    }
}
