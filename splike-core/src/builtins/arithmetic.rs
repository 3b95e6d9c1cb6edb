// splike-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, *, /, _cmod, floor
//!
//! All numbers are IEEE doubles; division by zero yields an infinity or
//! `NaN` rather than an error. `+` doubles as string concatenation when
//! either operand is a string.

use crate::env::Scope;
use crate::error::{AritySpec, Error, Result};
use crate::eval::Interpreter;
use crate::value::Value;

use super::{check_arity, number_arg};

fn add_pair(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x + y)),
        (Value::String(_), _) | (_, Value::String(_)) => {
            Ok(Value::string(format!("{}{}", a, b)))
        }
        (Value::Number(_), other) | (other, _) => Err(Error::expected(
            "+",
            "Number or String",
            other.type_name(),
        )),
    }
}

/// (+ x & more) - sum, or concatenation if any operand is a string
pub(crate) fn builtin_add(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("+", AritySpec::AtLeast(1), args)?;
    let mut acc = args[0].clone();
    if args.len() == 1 && !matches!(acc, Value::Number(_) | Value::String(_)) {
        return Err(Error::expected("+", "Number or String", acc.type_name()));
    }
    for arg in &args[1..] {
        acc = add_pair(&acc, arg)?;
    }
    Ok(acc)
}

/// (* x & more) - product
pub(crate) fn builtin_mul(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("*", AritySpec::AtLeast(1), args)?;
    let mut acc = number_arg("*", &args[0])?;
    for arg in &args[1..] {
        acc *= number_arg("*", arg)?;
    }
    Ok(Value::Number(acc))
}

/// (/ x & more) - reciprocal of one argument, else left-to-right division
pub(crate) fn builtin_div(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("/", AritySpec::AtLeast(1), args)?;
    let first = number_arg("/", &args[0])?;
    if args.len() == 1 {
        return Ok(Value::Number(1.0 / first));
    }
    let mut acc = first;
    for arg in &args[1..] {
        acc /= number_arg("/", arg)?;
    }
    Ok(Value::Number(acc))
}

/// (_cmod a b) - remainder with the sign of the dividend
pub(crate) fn builtin_cmod(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("_cmod", AritySpec::Exact(2), args)?;
    let a = number_arg("_cmod", &args[0])?;
    let b = number_arg("_cmod", &args[1])?;
    Ok(Value::Number(a % b))
}

/// (floor x)
pub(crate) fn builtin_floor(_: &Interpreter, _: &Scope, args: &[Value]) -> Result<Value> {
    check_arity("floor", AritySpec::Exact(1), args)?;
    Ok(Value::Number(number_arg("floor", &args[0])?.floor()))
}
