// splike-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for Splike.
//!
//! Every primitive receives fully evaluated arguments. Anything the
//! language can express itself lives in the prelude instead.

mod arithmetic;
mod collections;
mod comparison;
mod io;
mod sequences;
mod type_checks;

use im::Vector;

use crate::env::Globals;
use crate::error::{AritySpec, Error, Result};
use crate::value::Value;

use arithmetic::{builtin_add, builtin_cmod, builtin_div, builtin_floor, builtin_mul};
use collections::{builtin_hash, builtin_subscript};
use comparison::{builtin_eq, builtin_lt};
use io::{builtin_die, builtin_print};
use sequences::{builtin_apply, builtin_cons, builtin_head, builtin_tail};
use type_checks::builtin_type;

/// Register all built-in functions in the given globals.
pub fn register_builtins(globals: &Globals) {
    // Arithmetic
    globals.define_native("+", builtin_add);
    globals.define_native("*", builtin_mul);
    globals.define_native("/", builtin_div);
    globals.define_native("_cmod", builtin_cmod);
    globals.define_native("floor", builtin_floor);

    // Comparison
    globals.define_native("<", builtin_lt);
    globals.define_native("=", builtin_eq);

    // Sequences
    globals.define_native("head", builtin_head);
    globals.define_native("tail", builtin_tail);
    globals.define_native("cons", builtin_cons);
    globals.define_native("apply", builtin_apply);

    // Collections
    globals.define_native("hash", builtin_hash);
    globals.define_native("_subscript", builtin_subscript);

    // Types
    globals.define_native("type", builtin_type);

    // I/O
    globals.define_native("print", builtin_print);
    globals.define_native("die", builtin_die);
}

// ============================================================================
// Argument helpers
// ============================================================================

pub(crate) fn check_arity(name: &str, spec: AritySpec, args: &[Value]) -> Result<()> {
    if spec.accepts(args.len()) {
        Ok(())
    } else {
        Err(Error::arity(name, spec, args.len()))
    }
}

pub(crate) fn number_arg(name: &str, val: &Value) -> Result<f64> {
    val.as_number()
        .ok_or_else(|| Error::expected(name, "Number", val.type_name()))
}

pub(crate) fn list_arg<'a>(name: &str, val: &'a Value) -> Result<&'a Vector<Value>> {
    match val {
        Value::List(items) => Ok(items),
        other => Err(Error::expected(name, "Array", other.type_name())),
    }
}

/// Display forms of `args`, separated by single spaces.
pub(crate) fn join_display(args: &[Value]) -> String {
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
