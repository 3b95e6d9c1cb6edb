// splike-core - Control flow special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Control flow special forms: if, case, and, or.

use splike_parser::Node;

use crate::env::Scope;
use crate::error::{AritySpec, Error, Result};
use crate::eval::Interpreter;
use crate::value::Value;

/// (if test then else?) - conditional
pub fn eval_if(interp: &Interpreter, scope: &Scope, args: &[Node]) -> Result<Value> {
    let arity = AritySpec::Range(2, 3);
    let [test, then, rest @ ..] = args else {
        return Err(Error::arity("if", arity, args.len()));
    };
    if !arity.accepts(args.len()) {
        return Err(Error::arity("if", arity, args.len()));
    }

    if interp.evaluate(test, scope)?.is_truthy() {
        interp.evaluate(then, scope)
    } else if let Some(otherwise) = rest.first() {
        interp.evaluate(otherwise, scope)
    } else {
        Ok(Value::Nil)
    }
}

/// (case expr k1 v1 k2 v2 ... default?) - compare against each key in turn
pub fn eval_case(interp: &Interpreter, scope: &Scope, args: &[Node]) -> Result<Value> {
    let Some((expr, clauses)) = args.split_first() else {
        return Err(Error::syntax("case", "requires an expression to match"));
    };
    let value = interp.evaluate(expr, scope)?;

    let pairs = clauses.chunks_exact(2);
    let default = pairs.remainder().first();
    for pair in pairs {
        let candidate = interp.evaluate(&pair[0], scope)?;
        if value.loose_eq(&candidate) {
            return interp.evaluate(&pair[1], scope);
        }
    }

    match default {
        Some(default) => interp.evaluate(default, scope),
        None => Ok(Value::Nil),
    }
}

/// (and exprs*) - short-circuit logical and, always a boolean
pub fn eval_and(interp: &Interpreter, scope: &Scope, args: &[Node]) -> Result<Value> {
    for expr in args {
        if !interp.evaluate(expr, scope)?.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// (or exprs*) - short-circuit logical or, always a boolean
pub fn eval_or(interp: &Interpreter, scope: &Scope, args: &[Node]) -> Result<Value> {
    for expr in args {
        if interp.evaluate(expr, scope)?.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}
