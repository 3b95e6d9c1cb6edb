// splike-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! I/O operations: print, die

use crate::env::Scope;
use crate::error::{Error, Result};
use crate::eval::Interpreter;
use crate::value::Value;

use super::join_display;

/// (print & args) - write args separated by spaces, then a newline
pub(crate) fn builtin_print(interp: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    interp.write_line(&join_display(args))?;
    Ok(Value::Nil)
}

/// (die & args) - abort the program
pub(crate) fn builtin_die(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    Err(Error::Died(join_display(args)))
}
