//! Day count selection for curve construction.
//!
//! Curves accept their day count either as a registered name or as a
//! caller-supplied capability object. Anything else — notably a non-string
//! value in a deserialized payload — is rejected when the curve is built,
//! never at first query.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use strata_core::daycounts::{DayCount, DayCountConvention};

use crate::error::{CurveError, CurveResult};

/// The default day count for curves that do not specify one.
pub const DEFAULT_DAY_COUNT: DayCountConvention = DayCountConvention::Act365Fixed;

/// A day count selector: a registered name, a known convention, or a
/// custom capability object.
#[derive(Clone)]
pub enum DayCountSpec {
    /// A convention name to look up in the registry ("actual/365", "30/360", ...).
    Named(String),
    /// A known convention.
    Convention(DayCountConvention),
    /// A caller-supplied day count implementation.
    Custom(Arc<dyn DayCount>),
}

impl DayCountSpec {
    /// Resolves the selector to a shared day count implementation.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError::TypeMismatch`] when a name is not a
    /// registered convention.
    pub fn resolve(&self) -> CurveResult<Arc<dyn DayCount>> {
        match self {
            DayCountSpec::Named(name) => name
                .parse::<DayCountConvention>()
                .map(|convention| convention.to_day_count())
                .map_err(|_| {
                    CurveError::type_mismatch(
                        "a registered day count convention name",
                        format!("'{name}'"),
                    )
                }),
            DayCountSpec::Convention(convention) => Ok(convention.to_day_count()),
            DayCountSpec::Custom(day_count) => Ok(Arc::clone(day_count)),
        }
    }

    /// Reads a selector from a serialized payload field.
    ///
    /// A missing or null field selects the default convention; a string is
    /// treated as a name; any other JSON value (a bare number, a bool, an
    /// object) is a type error.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError::TypeMismatch`] for non-string values.
    pub fn from_value(value: &Value) -> CurveResult<Self> {
        match value {
            Value::Null => Ok(DayCountSpec::Convention(DEFAULT_DAY_COUNT)),
            Value::String(name) => Ok(DayCountSpec::Named(name.clone())),
            other => Err(CurveError::type_mismatch(
                "a day count convention name (string)",
                json_kind(other),
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Default for DayCountSpec {
    fn default() -> Self {
        DayCountSpec::Convention(DEFAULT_DAY_COUNT)
    }
}

impl fmt::Debug for DayCountSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayCountSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            DayCountSpec::Convention(convention) => {
                f.debug_tuple("Convention").field(convention).finish()
            }
            DayCountSpec::Custom(day_count) => {
                f.debug_tuple("Custom").field(&day_count.name()).finish()
            }
        }
    }
}

impl From<&str> for DayCountSpec {
    fn from(name: &str) -> Self {
        DayCountSpec::Named(name.to_string())
    }
}

impl From<String> for DayCountSpec {
    fn from(name: String) -> Self {
        DayCountSpec::Named(name)
    }
}

impl From<DayCountConvention> for DayCountSpec {
    fn from(convention: DayCountConvention) -> Self {
        DayCountSpec::Convention(convention)
    }
}

impl From<Arc<dyn DayCount>> for DayCountSpec {
    fn from(day_count: Arc<dyn DayCount>) -> Self {
        DayCountSpec::Custom(day_count)
    }
}
