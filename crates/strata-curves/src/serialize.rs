//! Polymorphic curve serialization.
//!
//! Every curve serializes to a flat structural payload through
//! [`Curve::as_dict`]: at minimum a `type` tag, the ISO `curve_date`, and
//! the day count name, plus type-specific fields. [`curve_from_dict`]
//! reconstructs the concrete type by dispatching the tag through a
//! registry, so nested children (a [`CombinedCurve`](crate::curves::CombinedCurve)'s
//! benchmark and spread) rebuild polymorphically.
//!
//! The round-trip contract: `curve_from_dict(&c.as_dict())` reproduces
//! identical `get_rate` and `discount_t` outputs over any sampled horizon.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use strata_core::types::Date;

use crate::curves::{
    CombinedCurve, CreditSpreadCurve, FlatCreditSpreadCurve, FlatCurveAer, FlatCurveLog,
    ParCurve, SpotCurve, ZeroRateCurve,
};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

type Reconstructor = fn(&Value) -> CurveResult<Arc<dyn Curve>>;

static REGISTRY: Lazy<HashMap<&'static str, Reconstructor>> = Lazy::new(|| {
    let mut registry: HashMap<&'static str, Reconstructor> = HashMap::new();
    registry.insert("flat_aer", |v| {
        FlatCurveAer::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry.insert("flat_log", |v| {
        FlatCurveLog::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry.insert("flat_credit_spread", |v| {
        FlatCreditSpreadCurve::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry.insert("credit_spread", |v| {
        CreditSpreadCurve::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry.insert("zero", |v| {
        ZeroRateCurve::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry.insert("combined", |v| {
        CombinedCurve::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry.insert("par", |v| {
        ParCurve::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry.insert("spot", |v| {
        SpotCurve::from_dict(v).map(|c| Arc::new(c) as Arc<dyn Curve>)
    });
    registry
});

/// Reconstructs a curve from its serialized payload, dispatching on the
/// `type` tag.
///
/// # Errors
///
/// Returns a serialization error for a missing or unknown tag, and the
/// concrete type's construction errors for malformed fields.
pub fn curve_from_dict(value: &Value) -> CurveResult<Arc<dyn Curve>> {
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| CurveError::serialization("payload is missing a string `type` tag"))?;
    let reconstruct = REGISTRY
        .get(tag)
        .ok_or_else(|| CurveError::serialization(format!("unknown curve type tag '{tag}'")))?;
    reconstruct(value)
}

/// Returns the registered type tags, for diagnostics.
pub fn registered_tags() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = REGISTRY.keys().copied().collect();
    tags.sort_unstable();
    tags
}

// ---------------------------------------------------------------------------
// Payload field helpers shared by the per-type `from_dict` implementations
// ---------------------------------------------------------------------------

pub(crate) fn field<'a>(value: &'a Value, name: &str) -> CurveResult<&'a Value> {
    value.get(name).ok_or_else(|| {
        CurveError::serialization(format!("payload is missing the '{name}' field"))
    })
}

pub(crate) fn field_f64(value: &Value, name: &str) -> CurveResult<f64> {
    field(value, name)?.as_f64().ok_or_else(|| {
        CurveError::type_mismatch(format!("a number in '{name}'"), field_kind(value, name))
    })
}

pub(crate) fn field_date(value: &Value, name: &str) -> CurveResult<Date> {
    let raw = field(value, name)?.as_str().ok_or_else(|| {
        CurveError::type_mismatch(
            format!("an ISO date string in '{name}'"),
            field_kind(value, name),
        )
    })?;
    Date::parse(raw)
        .map_err(|e| CurveError::serialization(format!("bad date in '{name}': {e}")))
}

/// Reads a `[[t, value], ...]` pair list.
pub(crate) fn field_pairs(value: &Value, name: &str) -> CurveResult<Vec<(f64, f64)>> {
    let raw = field(value, name)?.as_array().ok_or_else(|| {
        CurveError::type_mismatch(
            format!("an array of [t, value] pairs in '{name}'"),
            field_kind(value, name),
        )
    })?;
    raw.iter()
        .map(|entry| {
            let pair = entry.as_array().filter(|a| a.len() == 2).ok_or_else(|| {
                CurveError::serialization(format!("'{name}' entries must be [t, value] pairs"))
            })?;
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(t), Some(v)) => Ok((t, v)),
                _ => Err(CurveError::serialization(format!(
                    "'{name}' entries must be numeric [t, value] pairs"
                ))),
            }
        })
        .collect()
}

/// Serializes `(t, value)` pairs as `[[t, value], ...]`.
pub(crate) fn pairs_value(pairs: impl Iterator<Item = (f64, f64)>) -> Value {
    Value::Array(
        pairs
            .map(|(t, v)| Value::Array(vec![t.into(), v.into()]))
            .collect(),
    )
}

fn field_kind(value: &Value, name: &str) -> String {
    match value.get(name) {
        None | Some(Value::Null) => "nothing".to_string(),
        Some(Value::Bool(_)) => "a boolean".to_string(),
        Some(Value::Number(_)) => "a number".to_string(),
        Some(Value::String(_)) => "a string".to_string(),
        Some(Value::Array(_)) => "an array".to_string(),
        Some(Value::Object(_)) => "an object".to_string(),
    }
}
