//! # Strata Core
//!
//! Core types and conventions for the Strata yield curve toolkit.
//!
//! This crate provides the foundational building blocks used throughout Strata:
//!
//! - **Types**: [`Date`], [`Tenor`], [`Frequency`], [`Compounding`], [`CashFlow`]
//! - **Day Count Conventions**: industry-standard year fraction calculations
//!
//! ## Example
//!
//! ```rust
//! use strata_core::prelude::*;
//!
//! let dc = Act365Fixed;
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//! assert_eq!(dc.day_count(start, end), 365);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{
        Act360, Act365Fixed, ActActIsda, DayCount, DayCountConvention, Thirty360US,
    };
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CashFlow, CashFlowKind, Compounding, Date, Frequency, Tenor};
}

pub use daycounts::{DayCount, DayCountConvention};
pub use error::{CoreError, CoreResult};
pub use types::{CashFlow, CashFlowKind, Compounding, Date, Frequency, Tenor};
