// splike-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations: head, tail, cons, apply
//!
//! `head` and `tail` accept strings as well as lists, treating a string
//! as a sequence of one-character strings.

use crate::env::Scope;
use crate::error::{AritySpec, Error, Result};
use crate::eval::Interpreter;
use crate::value::Value;

use super::{check_arity, list_arg};

/// (head xs) - first element, or nil when empty
pub(crate) fn builtin_head(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("head", AritySpec::Exact(1), args)?;
    match &args[0] {
        Value::List(items) => Ok(items.front().cloned().unwrap_or(Value::Nil)),
        Value::String(s) => Ok(s
            .chars()
            .next()
            .map(|c| Value::string(c.to_string()))
            .unwrap_or(Value::Nil)),
        other => Err(Error::expected("head", "Array or String", other.type_name())),
    }
}

/// (tail xs) - everything after the first element
pub(crate) fn builtin_tail(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("tail", AritySpec::Exact(1), args)?;
    match &args[0] {
        Value::List(items) => Ok(Value::List(items.clone().split_off(items.len().min(1)))),
        Value::String(s) => Ok(Value::string(s.chars().skip(1).collect::<String>())),
        other => Err(Error::expected("tail", "Array or String", other.type_name())),
    }
}

/// (cons x xs) - prepend
pub(crate) fn builtin_cons(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("cons", AritySpec::Exact(2), args)?;
    let head = args[0].clone();
    match &args[1] {
        Value::List(items) => {
            let mut items = items.clone();
            items.push_front(head);
            Ok(Value::List(items))
        }
        Value::String(s) => Ok(Value::list(
            std::iter::once(head).chain(s.chars().map(|c| Value::string(c.to_string()))),
        )),
        other => Err(Error::expected("cons", "Array", other.type_name())),
    }
}

/// (apply f args... xs) - call `f` with `args` followed by the elements of `xs`
pub(crate) fn builtin_apply(interp: &Interpreter, scope: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("apply", AritySpec::AtLeast(2), args)?;
    let (func, rest) = args.split_first().ok_or_else(|| {
        Error::arity("apply", AritySpec::AtLeast(2), args.len())
    })?;
    let (spread, leading) = rest
        .split_last()
        .ok_or_else(|| Error::arity("apply", AritySpec::AtLeast(2), args.len()))?;
    let spread = list_arg("apply", spread)?;

    let mut call_args = leading.to_vec();
    call_args.extend(spread.iter().cloned());
    interp.apply_value(func, scope, &call_args)
}
