// splike-core - Global and local bindings
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Bindings for variable lookup.
//!
//! There are exactly two tiers: one [`Globals`] table per interpreter,
//! mutated by `def` and `defn`, and a [`Scope`] value per active call.
//! Scopes are not chained. A callee's scope is a copy of the scope at
//! the call site with the parameters layered on top, so free identifiers
//! in a function body resolve against the caller.
//!
//! # Examples
//!
//! ```
//! use splike_core::{Globals, Scope, Value};
//!
//! let globals = Globals::new();
//! globals.define("x", Value::Number(1.0));
//!
//! let outer = Scope::new().layer([("y".into(), Value::Number(2.0))]);
//! let inner = outer.layer([("x".into(), Value::Number(3.0))]);
//!
//! assert_eq!(inner.get("y"), Some(&Value::Number(2.0)));
//! assert_eq!(inner.get("x"), Some(&Value::Number(3.0)));
//! // Layering never touches the original
//! assert!(!outer.contains("x"));
//! assert_eq!(globals.lookup("x"), Some(Value::Number(1.0)));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::eval::Interpreter;
use crate::value::{Function, Value};

/// The process-wide binding table. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    inner: Rc<RefCell<HashMap<Rc<str>, Value>>>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind or rebind a global name.
    pub fn define(&self, name: impl Into<Rc<str>>, value: Value) {
        self.inner.borrow_mut().insert(name.into(), value);
    }

    /// Bind a native function under `name`.
    pub fn define_native(
        &self,
        name: &str,
        func: impl Fn(&Interpreter, &Scope, &[Value]) -> Result<Value> + 'static,
    ) {
        self.define(name, Value::Function(Function::native(name, func)));
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.inner.borrow().contains_key(name)
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<Rc<str>> {
        let mut names: Vec<_> = self.inner.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// The local bindings of one call. Cheap to clone: the map is persistent.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: im::HashMap<Rc<str>, Value>,
}

impl Scope {
    /// The empty scope used for top-level forms and `def`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// A copy of this scope with `bindings` layered on top. Later
    /// bindings for the same name win.
    #[must_use]
    pub fn layer(&self, bindings: impl IntoIterator<Item = (Rc<str>, Value)>) -> Scope {
        let mut scope = self.clone();
        for (name, value) in bindings {
            scope.bindings.insert(name, value);
        }
        scope
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
