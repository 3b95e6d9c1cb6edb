// splike-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for Splike integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh interpreter with the prelude
//! - [`eval_bare`] - Evaluate code in a fresh interpreter without the prelude
//! - [`eval_all`] - Evaluate code in an existing interpreter
//! - [`new_interp`] - Create an interpreter with the prelude loaded
//! - [`capture_output`] - Redirect `print` output into a buffer
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code produces an error whose
//!   message contains the given text

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

pub use splike_core::{Config, Error, Hash, Interpreter, Value};

/// Filename used for test sources.
pub const TEST_FILE: &str = "test.splike";

/// Create an interpreter with builtins and the prelude.
///
/// # Panics
///
/// Panics if the prelude fails to load.
#[must_use]
pub fn new_interp() -> Interpreter {
    Interpreter::new(&Config::default()).expect("Failed to load prelude")
}

/// Create an interpreter with builtins only.
#[must_use]
pub fn new_bare_interp() -> Interpreter {
    let config = Config {
        load_prelude: false,
        ..Config::default()
    };
    Interpreter::new(&config).expect("Failed to create interpreter")
}

/// Create an interpreter from a custom configuration.
#[must_use]
pub fn new_interp_with(config: Config) -> Interpreter {
    Interpreter::new(&config).expect("Failed to create interpreter")
}

/// Evaluate source in a fresh interpreter with the prelude loaded.
///
/// # Returns
///
/// The value of the last form, or the error.
pub fn eval_str(s: &str) -> Result<Value, Error> {
    eval_all(s, &new_interp())
}

/// Evaluate source in a fresh interpreter without the prelude.
pub fn eval_bare(s: &str) -> Result<Value, Error> {
    eval_all(s, &new_bare_interp())
}

/// Evaluate every form of `s` in `interp`, returning the last value.
pub fn eval_all(s: &str, interp: &Interpreter) -> Result<Value, Error> {
    interp.run_source(s, TEST_FILE)
}

/// A `Write` sink that can be inspected after the interpreter writes to it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Redirect the interpreter's output into a buffer and return it.
pub fn capture_output(interp: &mut Interpreter) -> SharedBuffer {
    let buffer = SharedBuffer::default();
    interp.set_output(Box::new(buffer.clone()));
    buffer
}

/// Evaluate `s` with the prelude and return everything it printed.
pub fn output_of(s: &str) -> String {
    let mut interp = new_interp();
    let buffer = capture_output(&mut interp);
    if let Err(e) = eval_all(s, &interp) {
        panic!("Failed to evaluate '{}': {}", s, e.report());
    }
    buffer.contents()
}

pub fn num(n: f64) -> Value {
    Value::Number(n)
}

pub fn s(text: &str) -> Value {
    Value::string(text)
}

pub fn list(items: Vec<Value>) -> Value {
    Value::list(items)
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", num(3.0));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.as_ref().err().map(|e| e.report())
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error whose message
/// contains `fragment`.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(1 2)", "is not a function");
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr, $fragment:expr) => {
        let result = $crate::common::eval_str($input);
        match result {
            Ok(value) => panic!("Expected error for '{}' but got {}", $input, value),
            Err(e) => assert!(
                e.to_string().contains($fragment),
                "Error for '{}' was '{}', expected it to contain '{}'",
                $input,
                e,
                $fragment
            ),
        }
    };
}
