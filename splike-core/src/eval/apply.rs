// splike-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for Splike.

use im::Vector;
use splike_parser::Node;

use super::Interpreter;
use super::binding::bind_parameters;
use crate::env::Scope;
use crate::error::{Error, Result};
use crate::value::{Closure, Function, FunctionKind, Value};

impl Interpreter {
    /// Apply a function to evaluated arguments. `scope` is the caller's
    /// scope; closures bind their parameters on top of it.
    pub fn apply(&self, func: &Function, scope: &Scope, args: &[Value]) -> Result<Value> {
        match func.kind() {
            FunctionKind::Native { func, .. } => func(self, scope, args),
            FunctionKind::Closure(closure) => self.call_closure(closure, scope, args),
            FunctionKind::SpecialForm { name, .. } => Err(Error::type_error(
                *name,
                "special forms cannot be applied to evaluated arguments",
            )),
        }
    }

    /// Apply any value, failing if it is not callable.
    pub fn apply_value(&self, func: &Value, scope: &Scope, args: &[Value]) -> Result<Value> {
        match func {
            Value::Function(f) => self.apply(f, scope, args),
            other => Err(Error::NotCallable {
                source_text: other.inspect(),
            }),
        }
    }

    /// Invoke a special form on raw operand syntax.
    pub(crate) fn call_special_form(
        &self,
        func: &Function,
        scope: &Scope,
        operands: &[Node],
    ) -> Result<Value> {
        match func.kind() {
            FunctionKind::SpecialForm { form, .. } => form(self, scope, operands),
            _ => Err(Error::type_error(
                func.to_string(),
                "not a special form",
            )),
        }
    }

    /// Run the first variant whose parameter list accepts `args`.
    fn call_closure(&self, closure: &Closure, scope: &Scope, args: &[Value]) -> Result<Value> {
        for variant in &closure.variants {
            let Some(bindings) = bind_parameters(&variant.params, args)? else {
                continue;
            };
            let local = scope.layer(bindings);
            // An empty body yields an empty list
            let mut result = Value::List(Vector::new());
            for expr in variant.body.iter() {
                result = self.evaluate(expr, &local)?;
            }
            return Ok(result);
        }

        Err(Error::NoMatchingSignature {
            name: closure.name.as_deref().map(String::from),
            args: args
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
