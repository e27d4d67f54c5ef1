//! # Strata Curves
//!
//! Yield curve representation and bootstrapping for the Strata fixed
//! income toolkit.
//!
//! This crate provides:
//!
//! - **Curve trait**: the [`Curve`] query contract (`get_rate`,
//!   `discount_t`, `date_rate`, serialization) shared by every curve type
//! - **Flat curves**: [`FlatCurveAer`], [`FlatCurveLog`] and the credit
//!   spread leaves [`FlatCreditSpreadCurve`], [`CreditSpreadCurve`]
//! - **Composition**: [`CombinedCurve`], an additive benchmark + spread
//!   overlay
//! - **Bootstrap**: the shared sequential [`Bootstrapper`] and its two
//!   adapters, [`ParCurve`] (par quotes) and [`SpotCurve`] (bond
//!   collections)
//! - **Serialization**: per-type `as_dict` payloads with polymorphic
//!   reconstruction through [`curve_from_dict`]
//! - **Profiles**: [`CurveProfile`], sampled series for plotting
//!   collaborators
//!
//! ## Quick start
//!
//! ```rust
//! use strata_curves::prelude::*;
//! use strata_core::types::{Date, Frequency, Tenor};
//!
//! let curve = ParCurve::builder(Date::from_ymd(2025, 8, 22).unwrap())
//!     .add_quote(RateQuote::zero_yield(Tenor::Months(6), 0.0414))
//!     .add_quote(RateQuote::zero_yield(Tenor::Years(1), 0.0395))
//!     .add_quote(RateQuote::par_bond(Tenor::Years(2), 3.79, Frequency::SemiAnnual, 100.0))
//!     .day_count("actual/365")
//!     .build()
//!     .unwrap();
//!
//! let df = curve.discount_t(1.0).unwrap();
//! assert!(df > 0.0 && df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod bootstrap;
pub mod conventions;
pub mod curves;
pub mod error;
pub mod profile;
pub mod quotes;
pub mod serialize;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapInstrument, Bootstrapper, InstrumentKind};
    pub use crate::conventions::DayCountSpec;
    pub use crate::curves::{
        CombinedCurve, CreditSpreadCurve, FlatCreditSpreadCurve, FlatCurveAer, FlatCurveLog,
        ParCurve, ParCurveBuilder, SpotCurve, SpotCurveBuilder, ZeroRateCurve,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::profile::{CurvePoint, CurveProfile};
    pub use crate::quotes::{QuoteKind, RateQuote};
    pub use crate::serialize::curve_from_dict;
    pub use crate::traits::Curve;
}

pub use bootstrap::{BootstrapInstrument, Bootstrapper, InstrumentKind};
pub use conventions::DayCountSpec;
pub use curves::{
    CombinedCurve, CreditSpreadCurve, FlatCreditSpreadCurve, FlatCurveAer, FlatCurveLog, ParCurve,
    SpotCurve, ZeroRateCurve,
};
pub use error::{CurveError, CurveResult};
pub use profile::CurveProfile;
pub use quotes::{QuoteKind, RateQuote};
pub use serialize::curve_from_dict;
pub use traits::Curve;
