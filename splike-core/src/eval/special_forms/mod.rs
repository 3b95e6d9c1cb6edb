// splike-core - Special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Special forms for the Splike evaluator.
//!
//! Each form receives its operands as unevaluated syntax and decides
//! itself what to evaluate.

pub mod control;
pub mod definitions;
pub mod scoping;

pub use control::{eval_and, eval_case, eval_if, eval_or};
pub use definitions::{eval_def, eval_defined, eval_defn, eval_fn};
pub use scoping::{eval_eval, eval_let};

use crate::env::Globals;
use crate::value::{Function, SpecialFormFn, Value};

/// Every special form, by the name it is bound under.
pub const SPECIAL_FORMS: &[(&str, SpecialFormFn)] = &[
    ("eval", eval_eval),
    ("def", eval_def),
    ("fn", eval_fn),
    ("defn", eval_defn),
    ("defined?", eval_defined),
    ("if", eval_if),
    ("case", eval_case),
    ("let", eval_let),
    ("and", eval_and),
    ("or", eval_or),
];

pub fn register_special_forms(globals: &Globals) {
    for &(name, form) in SPECIAL_FORMS {
        globals.define(name, Value::Function(Function::special_form(name, form)));
    }
}
