// splike-core - Definition special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Definition special forms: def, fn, defn, defined?.

use std::rc::Rc;

use splike_parser::Node;
use tracing::debug;

use crate::env::Scope;
use crate::error::{Error, Result};
use crate::eval::Interpreter;
use crate::value::{Closure, FnVariant, Function, Value};

/// (def name value?) - bind a global. The value is evaluated in an empty
/// scope, so locals of the surrounding form are not visible.
pub fn eval_def(interp: &Interpreter, _scope: &Scope, args: &[Node]) -> Result<Value> {
    if args.is_empty() || args.len() > 2 {
        return Err(Error::syntax("def", "requires a name and a value"));
    }
    let name = binding_name("def", &args[0])?;
    let value = match args.get(1) {
        Some(expr) => interp.evaluate(expr, &Scope::new())?,
        None => Value::Nil,
    };
    debug!(name = %name, "defined global");
    interp.globals().define(name, value);
    Ok(Value::Nil)
}

/// (fn [params] body...) or (fn ([params] body...) ...) - create a function
pub fn eval_fn(_interp: &Interpreter, _scope: &Scope, args: &[Node]) -> Result<Value> {
    let variants = parse_variants("fn", args)?;
    Ok(Value::Function(Function::closure(Closure {
        name: None,
        variants,
    })))
}

/// (defn name variants...) - define a named function
pub fn eval_defn(interp: &Interpreter, _scope: &Scope, args: &[Node]) -> Result<Value> {
    let Some((name, variants)) = args.split_first() else {
        return Err(Error::syntax("defn", "requires a name"));
    };
    let name = binding_name("defn", name)?;
    let variants = parse_variants("defn", variants)?;
    debug!(name = %name, variants = variants.len(), "defined function");
    let func = Function::closure(Closure {
        name: Some(name.clone()),
        variants,
    });
    interp.globals().define(name, Value::Function(func));
    Ok(Value::Nil)
}

/// (defined? name) - is `name` bound locally or globally?
pub fn eval_defined(interp: &Interpreter, scope: &Scope, args: &[Node]) -> Result<Value> {
    let [name] = args else {
        return Err(Error::syntax("defined?", "requires exactly one name"));
    };
    let name = binding_name("defined?", name)?;
    Ok(Value::Bool(
        scope.contains(&name) || interp.globals().is_defined(&name),
    ))
}

fn binding_name(form: &'static str, node: &Node) -> Result<Rc<str>> {
    match node {
        Node::Identifier(name) => Ok(name.clone()),
        other => Err(Error::syntax(
            form,
            format!("expected an identifier, found {} {}", other.kind_name(), other),
        )),
    }
}

/// Accepts either a single variant written inline (`[params] body...`)
/// or a sequence of `([params] body...)` lists.
fn parse_variants(form: &'static str, args: &[Node]) -> Result<Vec<FnVariant>> {
    match args.first() {
        None => Err(Error::syntax(form, "requires at least one variant")),
        Some(Node::Vector(params)) => Ok(vec![FnVariant {
            params: parse_params(form, params)?,
            body: args[1..].into(),
        }]),
        Some(_) => args.iter().map(|variant| parse_variant(form, variant)).collect(),
    }
}

fn parse_variant(form: &'static str, node: &Node) -> Result<FnVariant> {
    let Node::List(seq) = node else {
        return Err(Error::syntax(
            form,
            format!("each variant must be a list, found {} {}", node.kind_name(), node),
        ));
    };
    match seq.head() {
        Some(Node::Vector(params)) => Ok(FnVariant {
            params: parse_params(form, params)?,
            body: seq.operands().into(),
        }),
        Some(Node::List(params)) => Ok(FnVariant {
            params: parse_params(form, &params.items)?,
            body: seq.operands().into(),
        }),
        _ => Err(Error::syntax(
            form,
            format!("variant {} must start with a parameter vector", node),
        )),
    }
}

fn parse_params(form: &'static str, params: &[Node]) -> Result<Vec<Rc<str>>> {
    params
        .iter()
        .map(|param| match param {
            Node::Identifier(name) => Ok(name.clone()),
            other => Err(Error::syntax(
                form,
                format!("parameters must be identifiers, found {} {}", other.kind_name(), other),
            )),
        })
        .collect()
}
