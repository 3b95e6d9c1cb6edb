// splike-core - AST-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for Splike programs.
//!
//! The [`Interpreter`] owns the global table and the host bridge and is
//! handed by reference to every special form and native function.
//! Evaluation keeps a stack of the call forms currently being evaluated;
//! when an error first surfaces it is annotated with one trace line per
//! frame, innermost first.

pub mod apply;
pub mod binding;
pub mod resolve;
pub mod special_forms;
mod stack;

pub use binding::{REST_MARKER, bind_parameters};
pub use resolve::{IdentifierKind, classify};

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use splike_parser::{Node, Seq};
use tracing::{debug, trace};

use crate::builtins::register_builtins;
use crate::config::Config;
use crate::env::{Globals, Scope};
use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::host::{HostBridge, StandardHost};
use crate::value::{Function, Value};

use stack::ensure_sufficient_stack;

/// Filename reported for prelude locations.
pub const PRELUDE_FILENAME: &str = "std.splike";

pub struct Interpreter {
    globals: Globals,
    host: Box<dyn HostBridge>,
    max_depth: usize,
    depth: Cell<usize>,
    stack: RefCell<Vec<Seq>>,
    output: RefCell<Box<dyn Write>>,
}

/// RAII guard for one evaluation frame: bumps the depth counter and,
/// for call forms, pushes the form onto the trace stack.
struct FrameGuard<'a> {
    interp: &'a Interpreter,
    pushed: bool,
}

impl<'a> FrameGuard<'a> {
    fn enter(interp: &'a Interpreter, node: &Node) -> Result<Self> {
        let depth = interp.depth.get() + 1;
        if depth > interp.max_depth {
            return Err(Error::StackOverflow {
                depth: interp.max_depth,
            });
        }
        interp.depth.set(depth);

        let pushed = match node {
            Node::List(seq) => {
                interp.stack.borrow_mut().push(seq.clone());
                true
            }
            _ => false,
        };
        Ok(FrameGuard { interp, pushed })
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.interp.stack.borrow_mut().pop();
        }
        self.interp
            .depth
            .set(self.interp.depth.get().saturating_sub(1));
    }
}

impl Interpreter {
    /// Create an interpreter with the standard host bridge, restricted to
    /// the configured namespaces.
    pub fn new(config: &Config) -> Result<Self> {
        let host = match &config.host_namespaces {
            Some(namespaces) => StandardHost::with_namespaces(namespaces.iter().cloned()),
            None => StandardHost::new(),
        };
        Self::with_host(config, Box::new(host))
    }

    /// Create an interpreter with a custom host bridge.
    pub fn with_host(config: &Config, host: Box<dyn HostBridge>) -> Result<Self> {
        let interp = Interpreter {
            globals: Globals::new(),
            host,
            max_depth: config.max_depth,
            depth: Cell::new(0),
            stack: RefCell::new(Vec::new()),
            output: RefCell::new(Box::new(io::stdout())),
        };
        special_forms::register_special_forms(&interp.globals);
        register_builtins(&interp.globals);
        if config.load_prelude {
            interp.load_prelude()?;
        }
        Ok(interp)
    }

    /// Redirect `print` and `console/log` output.
    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = RefCell::new(output);
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn host(&self) -> &dyn HostBridge {
        self.host.as_ref()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Current evaluation depth; zero between top-level forms.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Bind a native function in the globals.
    pub fn define_native(
        &self,
        name: &str,
        func: impl Fn(&Interpreter, &Scope, &[Value]) -> Result<Value> + 'static,
    ) {
        self.globals.define_native(name, func);
    }

    /// Evaluate the embedded prelude into the globals.
    pub fn load_prelude(&self) -> Result<()> {
        debug!("loading prelude");
        self.run_source(crate::PRELUDE, PRELUDE_FILENAME)?;
        Ok(())
    }

    /// Write one line to the interpreter's output.
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut out = self.output.borrow_mut();
        writeln!(out, "{}", line)
            .and_then(|_| out.flush())
            .map_err(|e| Error::Io {
                path: "<output>".to_string(),
                message: e.to_string(),
            })
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Evaluate each top-level form in a fresh scope, returning the value
    /// of the last one (`nil` for no forms).
    pub fn evaluate_all(&self, nodes: &[Node]) -> Result<Value> {
        let scope = Scope::new();
        let mut result = Value::Nil;
        for node in nodes {
            result = self.evaluate(node, &scope)?;
        }
        Ok(result)
    }

    /// Parse and evaluate source text.
    pub fn run_source(&self, source: &str, filename: &str) -> Result<Value> {
        let nodes = splike_parser::parse(source, filename)?;
        self.evaluate_all(&nodes)
    }

    /// Read, parse and evaluate a file.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "running file");
        self.run_source(&source, &path.display().to_string())
    }

    /// Evaluate one node in `scope`.
    pub fn evaluate(&self, node: &Node, scope: &Scope) -> Result<Value> {
        ensure_sufficient_stack(|| {
            let _frame = FrameGuard::enter(self, node)?;
            self.eval_node(node, scope).map_err(|e| self.annotate(e))
        })
    }

    /// Variable lookup: local scope, then globals, then `nil`.
    pub fn lookup(&self, name: &str, scope: &Scope) -> Value {
        scope
            .get(name)
            .cloned()
            .or_else(|| self.globals.lookup(name))
            .unwrap_or(Value::Nil)
    }

    // ========================================================================
    // Node evaluation
    // ========================================================================

    fn eval_node(&self, node: &Node, scope: &Scope) -> Result<Value> {
        match node {
            Node::String(s) => Ok(Value::String(s.clone())),
            Node::Literal(lit) => Ok(Value::from(lit)),
            Node::Identifier(name) => Ok(self.eval_identifier(name, scope)),
            Node::Hash(pairs) => {
                let hash = Hash::new();
                for (key, value) in pairs.iter() {
                    hash.set(Value::from(key), self.evaluate(value, scope)?);
                }
                Ok(Value::Hash(hash))
            }
            Node::List(seq) => self.eval_call(seq, scope),
            Node::QuotedList(seq) => self.eval_sequence(&seq.items, scope),
            Node::Vector(items) => self.eval_sequence(items, scope),
        }
    }

    fn eval_sequence(&self, items: &[Node], scope: &Scope) -> Result<Value> {
        let values = items
            .iter()
            .map(|item| self.evaluate(item, scope))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::list(values))
    }

    fn eval_identifier(&self, name: &Rc<str>, scope: &Scope) -> Value {
        match classify(name) {
            IdentifierKind::Field(field) => {
                let field: Rc<str> = field.into();
                Value::Function(Function::native(name.clone(), move |interp, _, args| {
                    let object = args.first().ok_or_else(|| {
                        Error::type_error(format!(".-{}", field), "missing object argument")
                    })?;
                    interp.host().field(object, &field)
                }))
            }
            IdentifierKind::Method(method) => {
                let method: Rc<str> = method.into();
                Value::Function(Function::native(name.clone(), move |interp, _, args| {
                    let (object, rest) = args.split_first().ok_or_else(|| {
                        Error::type_error(format!(".{}", method), "missing object argument")
                    })?;
                    interp.host().method(object, &method, rest)
                }))
            }
            IdentifierKind::HostGlobal(segments) => {
                let path: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
                Value::Function(Function::native(name.clone(), move |interp, _, args| {
                    let path: Vec<&str> = path.iter().map(String::as_str).collect();
                    interp.host().global(interp, &path, args)
                }))
            }
            IdentifierKind::Variable(name) => self.lookup(name, scope),
        }
    }

    fn eval_call(&self, seq: &Seq, scope: &Scope) -> Result<Value> {
        let Some(head) = seq.head() else {
            return Ok(Value::Nil);
        };
        let operator = self.evaluate(head, scope)?;

        if let Value::Function(func) = &operator
            && func.is_special_form()
        {
            trace!(operator = %head, special_form = true, args = seq.operands().len(), "dispatch");
            return self.call_special_form(func, scope, seq.operands());
        }

        let args = seq
            .operands()
            .iter()
            .map(|operand| self.evaluate(operand, scope))
            .collect::<Result<Vec<_>>>()?;

        match operator {
            Value::Function(func) => {
                trace!(operator = %head, special_form = false, args = args.len(), "dispatch");
                self.apply(&func, scope, &args)
            }
            _ => Err(Error::NotCallable {
                source_text: head.to_string(),
            }),
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Attach the current evaluation trace to an error that has none.
    fn annotate(&self, error: Error) -> Error {
        if error.is_traced() || error.is_fatal() {
            return error;
        }
        let trace = self.stack_trace();
        Error::Traced {
            error: Box::new(error),
            trace,
        }
    }

    /// One line per call form on the stack, innermost first.
    pub fn stack_trace(&self) -> Vec<String> {
        self.stack
            .borrow()
            .iter()
            .rev()
            .filter_map(|seq| {
                seq.head()
                    .map(|head| format!("{} ({})", head, seq.location))
            })
            .collect()
    }
}
