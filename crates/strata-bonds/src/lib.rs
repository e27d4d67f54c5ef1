//! # Strata Bonds
//!
//! The bond collaborator for the Strata yield curve toolkit: fixed-rate
//! bullet bonds with schedule generation, ordered cash flows, and a
//! price-XOR-yield pricing mode. Bond-driven curve bootstrapping
//! (`strata-curves`) consumes these.
//!
//! ## Example
//!
//! ```rust
//! use strata_bonds::{FixedRateBullet, Pricing};
//! use strata_core::types::{Date, Frequency};
//!
//! let settle = Date::from_ymd(2025, 8, 22).unwrap();
//! let bond = FixedRateBullet::new(
//!     settle,
//!     Date::from_ymd(2027, 8, 22).unwrap(),
//!     3.79,
//!     Frequency::SemiAnnual,
//!     Pricing::CleanPrice(100.0),
//!     settle,
//! )
//! .unwrap();
//! assert_eq!(bond.cash_flows().len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bullet;
pub mod error;
pub mod pricing;

pub use bullet::FixedRateBullet;
pub use error::{BondError, BondResult};
pub use pricing::Pricing;
