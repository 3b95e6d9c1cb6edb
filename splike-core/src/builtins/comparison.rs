// splike-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: <, =
//!
//! The rest of the ordering family is defined in the prelude.

use crate::env::Scope;
use crate::error::{AritySpec, Error, Result};
use crate::eval::Interpreter;
use crate::value::Value;

use super::check_arity;

/// (< a b) - numbers numerically, strings lexicographically
pub(crate) fn builtin_lt(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("<", AritySpec::Exact(2), args)?;
    match (&args[0], &args[1]) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),
        (Value::String(a), Value::String(b)) => Ok(Value::Bool(a < b)),
        (a, b) => Err(Error::type_error(
            "<",
            format!(
                "cannot compare {} with {}",
                a.type_name(),
                b.type_name()
            ),
        )),
    }
}

/// (= a b) - loose equality
pub(crate) fn builtin_eq(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("=", AritySpec::Exact(2), args)?;
    Ok(Value::Bool(args[0].loose_eq(&args[1])))
}
