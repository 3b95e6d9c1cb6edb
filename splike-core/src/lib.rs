// splike-core - Runtime and evaluator for the Splike programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # splike-core
//!
//! Runtime and evaluator for the Splike programming language.
//! Provides an AST-walking interpreter over [`splike_parser::Node`] trees.
//!
//! ```
//! use splike_core::{Config, Interpreter, Value};
//!
//! let interp = Interpreter::new(&Config::default()).unwrap();
//! let result = interp.run_source("(defn sq [x] (* x x)) (sq 7)", "doc.splike").unwrap();
//! assert_eq!(result, Value::Number(49.0));
//! ```

pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod hash;
pub mod host;
pub mod value;

pub use builtins::register_builtins;
pub use config::Config;
pub use env::{Globals, Scope};
pub use error::{AritySpec, Error, Result};
pub use eval::Interpreter;
pub use hash::Hash;
pub use host::{HostBridge, StandardHost};
pub use value::{Closure, FnVariant, Function, FunctionKind, Value};

// Re-export parser types for convenience
pub use splike_parser::{Location, Node};

/// Embedded prelude, evaluated by [`Interpreter::load_prelude`].
pub const PRELUDE: &str = include_str!("../../splike-std/std.splike");
