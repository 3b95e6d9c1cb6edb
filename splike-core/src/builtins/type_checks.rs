// splike-core - Type inspection built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type inspection: type

use crate::env::Scope;
use crate::error::{AritySpec, Result};
use crate::eval::Interpreter;
use crate::value::Value;

use super::check_arity;

/// (type x) - the type name of x, e.g. "Number" or "Array"
pub(crate) fn builtin_type(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("type", AritySpec::Exact(1), args)?;
    Ok(Value::string(args[0].type_name()))
}
