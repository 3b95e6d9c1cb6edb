// splike-core - Collection built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Collection operations: hash, _subscript

use crate::env::Scope;
use crate::error::{AritySpec, Error, Result};
use crate::eval::Interpreter;
use crate::hash::Hash;
use crate::value::Value;

use super::{check_arity, list_arg};

/// (hash [k1 v1 k2 v2 ...]) - build a hash from a flat entry list
pub(crate) fn builtin_hash(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("hash", AritySpec::Exact(1), args)?;
    let entries = list_arg("hash", &args[0])?;
    Ok(Value::Hash(Hash::from_flat(entries.iter().cloned())))
}

/// (_subscript coll key) - index a list or string by position, or a hash
/// by key. Missing entries are nil.
pub(crate) fn builtin_subscript(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("_subscript", AritySpec::Exact(2), args)?;
    let key = &args[1];
    match &args[0] {
        Value::Hash(hash) => Ok(hash.get(key).unwrap_or(Value::Nil)),
        Value::List(items) => Ok(index(key)
            .and_then(|i| items.get(i).cloned())
            .unwrap_or(Value::Nil)),
        Value::String(s) => Ok(index(key)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::string(c.to_string()))
            .unwrap_or(Value::Nil)),
        Value::Nil => Err(Error::type_error(
            "_subscript",
            format!("cannot read {} of nil", key.inspect()),
        )),
        _ => Ok(Value::Nil),
    }
}

/// A non-negative integral number as a position.
fn index(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= usize::MAX as f64 => {
            Some(*n as usize)
        }
        _ => None,
    }
}
