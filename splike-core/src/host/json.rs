// splike-core - JSON conversion for the host bridge
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Conversion between runtime values and `serde_json` values, used by
//! `JSON/stringify` and `JSON/parse`.

use serde_json::{Map, Number};

use crate::hash::Hash;
use crate::value::Value;

/// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A hash was reached again while converting its own entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert a hash that contains itself")]
pub struct CyclicHash;

/// Convert a runtime value to JSON.
///
/// Non-finite numbers and functions have no JSON form and become `null`.
/// Hash keys are written in their display form, in insertion order.
pub fn to_json(value: &Value) -> Result<serde_json::Value, CyclicHash> {
    Ok(match value {
        Value::Nil | Value::Function(_) => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::List(items) => {
            serde_json::Value::Array(items.iter().map(to_json).collect::<Result<_, _>>()?)
        }
        Value::Hash(hash) => {
            let _walk = hash.walk().ok_or(CyclicHash)?;
            let mut map = Map::new();
            for (key, value) in hash.entries() {
                map.insert(key.to_string(), to_json(&value)?);
            }
            serde_json::Value::Object(map)
        }
    })
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Convert JSON to a runtime value. Objects become hashes with string keys.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s.as_str()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(from_json)),
        serde_json::Value::Object(map) => Value::Hash(Hash::from_pairs(
            map.iter()
                .map(|(key, value)| (Value::string(key.as_str()), from_json(value))),
        )),
    }
}
