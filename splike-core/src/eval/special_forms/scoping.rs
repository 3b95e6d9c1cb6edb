// splike-core - Scoping special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Scoping special forms: let and eval.

use std::rc::Rc;

use splike_parser::Node;

use crate::env::Scope;
use crate::error::{Error, Result};
use crate::eval::Interpreter;
use crate::value::Value;

/// (let [name expr ...] body...) - local bindings
///
/// Every binding expression sees the enclosing scope only; a later
/// binding cannot refer to an earlier one in the same `let`.
pub fn eval_let(interp: &Interpreter, scope: &Scope, args: &[Node]) -> Result<Value> {
    let Some((bindings, body)) = args.split_first() else {
        return Err(Error::syntax("let", "requires a binding vector"));
    };
    let Node::Vector(items) = bindings else {
        return Err(Error::type_error(
            "let",
            "First argument to `let` must be a Vector.",
        ));
    };
    if !items.len().is_multiple_of(2) {
        return Err(Error::syntax(
            "let",
            "binding vector requires an even number of forms",
        ));
    }

    let mut bound: Vec<(Rc<str>, Value)> = Vec::with_capacity(items.len() / 2);
    for pair in items.chunks_exact(2) {
        let Node::Identifier(name) = &pair[0] else {
            return Err(Error::syntax(
                "let",
                format!("binding names must be identifiers, found {}", pair[0]),
            ));
        };
        bound.push((name.clone(), interp.evaluate(&pair[1], scope)?));
    }

    let local = scope.layer(bound);
    let mut result = Value::Nil;
    for expr in body {
        result = interp.evaluate(expr, &local)?;
    }
    Ok(result)
}

/// (eval expr) - evaluate held syntax in the current scope
pub fn eval_eval(interp: &Interpreter, scope: &Scope, args: &[Node]) -> Result<Value> {
    let [expr] = args else {
        return Err(Error::syntax("eval", "requires exactly one argument"));
    };
    interp.evaluate(expr, scope)
}
