// splike-core - Function integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for Splike functions.
//!
//! Tests for: fn, defn, multi-arity dispatch, rest parameters,
//! caller-scope resolution of free identifiers

mod common;

use common::{Error, Value, eval_str, list, num, s};

// =============================================================================
// fn / defn
// =============================================================================

#[test]
fn test_fn_shorthand() {
    assert_eval!("((fn [x] (* x 2)) 21)", num(42.0));
}

#[test]
fn test_fn_variant_list() {
    assert_eval!("((fn ([x] (* x 2))) 21)", num(42.0));
}

#[test]
fn test_fn_list_parameters() {
    // A variant's parameter list may also be written as a list
    assert_eval!("((fn ((x y) (+ x y))) 1 2)", num(3.0));
}

#[test]
fn test_defn_returns_nil_and_binds() {
    assert_eval!("(defn f [x] x)", Value::Nil);
    assert_eval!("(defn f [x] x) (f 9)", num(9.0));
}

#[test]
fn test_empty_body_returns_empty_list() {
    assert_eval!("((fn [x]) 1)", list(vec![]));
}

#[test]
fn test_body_returns_last_form() {
    assert_eval!("((fn [x] 1 2 x) 3)", num(3.0));
}

#[test]
fn test_recursion_through_globals() {
    assert_eval!(
        "(defn fact [n] (if (< n 2) 1 (* n (fact (- n 1))))) (fact 10)",
        num(3_628_800.0)
    );
}

#[test]
fn test_function_display() {
    assert_eval!("(defn f [x] x) (+ \"\" f)", s("#<fn f>"));
    assert_eval!("(+ \"\" (fn [x] x))", s("#<fn>"));
}

// =============================================================================
// Multi-arity dispatch
// =============================================================================

const TWO_OR_THREE: &str = "(def f (fn ([a b] a) ([a b c] c)))";

#[test]
fn test_multi_arity_two_args() {
    assert_eval!(&format!("{} (f 1 2)", TWO_OR_THREE), num(1.0));
}

#[test]
fn test_multi_arity_three_args() {
    assert_eval!(&format!("{} (f 1 2 3)", TWO_OR_THREE), num(3.0));
}

#[test]
fn test_multi_arity_no_match() {
    for call in ["(f 1)", "(f 1 2 3 4)"] {
        let err = eval_str(&format!("{} {}", TWO_OR_THREE, call)).unwrap_err();
        assert!(
            matches!(err.root(), Error::NoMatchingSignature { name: None, .. }),
            "unexpected error for {}: {:?}",
            call,
            err
        );
    }
}

#[test]
fn test_first_matching_variant_wins() {
    assert_eval!("((fn ([& xs] \"rest\") ([a] \"one\")) 1)", s("rest"));
}

#[test]
fn test_no_match_message_names_function() {
    assert_eval_err!(
        "(defn add [a b] (+ a b)) (add 1 \"x\" 3)",
        "No matching call signature for `add` with arguments (1, x, 3)."
    );
}

#[test]
fn test_no_match_message_anonymous() {
    assert_eval_err!(
        "((fn [a] a))",
        "No matching call signature for anonymous function with arguments ()."
    );
}

// =============================================================================
// Rest parameters
// =============================================================================

#[test]
fn test_rest_collects_middle() {
    assert_eval!(
        "((fn ([a & rest b] rest)) 1 2 3 4)",
        list(vec![num(2.0), num(3.0)])
    );
}

#[test]
fn test_trailing_params_bind_from_end() {
    assert_eval!("((fn ([a & rest b] b)) 1 2 3 4)", num(4.0));
    assert_eval!("((fn ([a & rest b] a)) 1 2 3 4)", num(1.0));
}

#[test]
fn test_rest_may_be_empty() {
    assert_eval!("((fn [a & rest b] rest) 1 2)", list(vec![]));
}

#[test]
fn test_rest_requires_named_count() {
    assert_eval_err!("((fn [a & rest b] rest) 1)", "No matching call signature");
}

#[test]
fn test_only_rest() {
    assert_eval!("((fn [& xs] xs))", list(vec![]));
    assert_eval!("((fn [& xs] xs) 1 2)", list(vec![num(1.0), num(2.0)]));
}

#[test]
fn test_rest_marker_last_is_error() {
    assert_eval_err!("((fn [a &] a) 1)", "Invalid use of &-operator.");
}

#[test]
fn test_rest_marker_twice_is_error() {
    assert_eval_err!("((fn [a & b & c] a) 1 2 3)", "Invalid use of &-operator.");
}

// =============================================================================
// Caller-scope resolution
// =============================================================================

#[test]
fn test_free_identifier_resolves_in_caller_scope() {
    assert_eval!("(defn show [] y) (let [y 42] (show))", num(42.0));
}

#[test]
fn test_free_identifier_not_captured_at_definition() {
    // The let around the fn is gone by the time it is called
    assert_eval!("(def f (let [y 1] (fn [] y))) (f)", Value::Nil);
}

#[test]
fn test_parameters_shadow_caller_scope() {
    assert_eval!("(defn f [y] y) (let [y 1] (f 2))", num(2.0));
}

#[test]
fn test_caller_scope_flows_through_nested_calls() {
    assert_eval!(
        "(defn inner [] depth) (defn outer [depth] (inner)) (outer 3)",
        num(3.0)
    );
}

#[test]
fn test_apply_passes_caller_scope() {
    assert_eval!("(defn show [] z) (let [z 5] (apply show []))", num(5.0));
}
