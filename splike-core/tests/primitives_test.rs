// splike-core - Primitive function integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for the built-in primitives.
//!
//! Tests for: + * / < = _cmod floor head tail cons apply hash _subscript
//! type print die

mod common;

use common::{Value, list, num, output_of, s};

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn test_add_folds_left() {
    assert_eval!("(+ 1 2 3 4)", num(10.0));
    assert_eval!("(+ 7)", num(7.0));
}

#[test]
fn test_add_concatenates_strings() {
    assert_eval!("(+ \"a\" 1 2)", s("a12"));
    assert_eval!("(+ 1 2 \"a\")", s("3a"));
    assert_eval!("(+ \"n=\" nil)", s("n=nil"));
}

#[test]
fn test_add_rejects_non_numbers() {
    assert_eval_err!("(+ 1 nil)", "+: expected Number or String, got Nil");
    assert_eval_err!("(+ [1])", "+: expected Number or String, got Array");
}

#[test]
fn test_mul() {
    assert_eval!("(* 2 3 4)", num(24.0));
}

#[test]
fn test_div() {
    assert_eval!("(/ 4)", num(0.25));
    assert_eval!("(/ 100 5 2)", num(10.0));
    assert_eval!("(/ 1 0)", num(f64::INFINITY));
}

#[test]
fn test_cmod_and_floor() {
    assert_eval!("(_cmod -7 3)", num(-1.0));
    assert_eval!("(floor -1.5)", num(-2.0));
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn test_lt() {
    assert_eval!("(< 1 2)", Value::Bool(true));
    assert_eval!("(< 2 2)", Value::Bool(false));
    assert_eval!("(< \"abc\" \"abd\")", Value::Bool(true));
}

#[test]
fn test_lt_is_binary() {
    assert_eval_err!("(< 1 2 3)", "expected 2, got 3");
}

#[test]
fn test_eq_is_loose() {
    assert_eval!("(= 1 \"1\")", Value::Bool(true));
    assert_eval!("(= true 1)", Value::Bool(true));
    assert_eval!("(= nil false)", Value::Bool(false));
    assert_eval!("(= [1 2] [1 2])", Value::Bool(true));
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn test_head_tail() {
    assert_eval!("(head [1 2 3])", num(1.0));
    assert_eval!("(tail [1 2 3])", list(vec![num(2.0), num(3.0)]));
    assert_eval!("(head [])", Value::Nil);
    assert_eval!("(tail [])", list(vec![]));
}

#[test]
fn test_head_tail_of_string() {
    assert_eval!("(head \"abc\")", s("a"));
    assert_eval!("(tail \"abc\")", s("bc"));
}

#[test]
fn test_cons() {
    assert_eval!("(cons 0 [1 2])", list(vec![num(0.0), num(1.0), num(2.0)]));
    assert_eval!("(cons 0 [])", list(vec![num(0.0)]));
}

#[test]
fn test_cons_does_not_mutate() {
    assert_eval!("(def xs [1]) (cons 0 xs) xs", list(vec![num(1.0)]));
}

#[test]
fn test_apply_spreads_last_argument() {
    assert_eval!("(apply + [1 2 3])", num(6.0));
    assert_eval!("(apply + 1 2 [3 4])", num(10.0));
}

#[test]
fn test_apply_requires_list() {
    assert_eval_err!("(apply + 1)", "apply: expected Array, got Number");
}

#[test]
fn test_apply_non_function() {
    assert_eval_err!("(apply 5 [1])", "5 is not a function.");
}

// =============================================================================
// Collections and types
// =============================================================================

#[test]
fn test_subscript() {
    assert_eval!("(_subscript [1 2] 0)", num(1.0));
    assert_eval!("(_subscript [1 2] -1)", Value::Nil);
    assert_eval!("(_subscript [1 2] 0.5)", Value::Nil);
    assert_eval_err!("(_subscript nil 0)", "cannot read 0 of nil");
}

#[test]
fn test_type_names() {
    assert_eval!(
        "[(type nil) (type true) (type 1) (type \"s\") (type []) (type {}) (type head)]",
        list(vec![
            s("Nil"),
            s("Boolean"),
            s("Number"),
            s("String"),
            s("Array"),
            s("Hash"),
            s("Function"),
        ])
    );
}

// =============================================================================
// I/O
// =============================================================================

#[test]
fn test_print_joins_with_spaces() {
    assert_eq!(output_of("(print \"a\" 1 [\"b\" 2] nil)"), "a 1 [\"b\" 2] nil\n");
}

#[test]
fn test_print_returns_nil() {
    assert_eq!(output_of("(print (print))"), "\nnil\n");
}

#[test]
fn test_number_formatting() {
    assert_eq!(output_of("(print 1.5 -0 (/ 0 0) 100)"), "1.5 0 NaN 100\n");
}
