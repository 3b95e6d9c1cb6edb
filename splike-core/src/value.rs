// splike-core - Runtime values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime values produced by evaluation.

use std::fmt;
use std::rc::Rc;

use im::Vector;
use splike_parser::{Literal, Node, escape_string, format_number};

use crate::env::Scope;
use crate::error::Result;
use crate::eval::Interpreter;
use crate::hash::Hash;

/// Signature of a special form: it receives its operands unevaluated.
pub type SpecialFormFn = fn(&Interpreter, &Scope, &[Node]) -> Result<Value>;

/// Signature of a native function: it receives evaluated arguments.
pub type NativeFnImpl = dyn Fn(&Interpreter, &Scope, &[Value]) -> Result<Value>;

/// A runtime value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    List(Vector<Value>),
    Hash(Hash),
    Function(Function),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// `nil`, `false`, `0`, `NaN` and `""` are falsy. Everything else,
    /// including empty lists and hashes, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Hash(_) | Value::Function(_) => true,
        }
    }

    /// Name reported by the `type` primitive.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::List(_) => "Array",
            Value::Hash(_) => "Hash",
            Value::Function(_) => "Function",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Equality used for hash keys: strict equality, except that `NaN`
    /// matches itself.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (a, b) => a == b,
        }
    }

    /// Loose equality used by `case` and `=`: numbers and numeric strings
    /// compare as numbers, booleans compare as `0`/`1`, and `nil` only
    /// equals `nil`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Nil, _) | (_, Value::Nil) => false,
            (Value::Number(a), Value::String(s)) | (Value::String(s), Value::Number(a)) => {
                *a == string_to_number(s)
            }
            (Value::Bool(b), other) | (other, Value::Bool(b))
                if !matches!(other, Value::Bool(_)) =>
            {
                Value::Number(if *b { 1.0 } else { 0.0 }).loose_eq(other)
            }
            (a, b) => a == b,
        }
    }

    /// Representation used inside collections and by the REPL: like
    /// `Display`, but strings are quoted.
    pub fn inspect(&self) -> String {
        match self {
            Value::String(s) => format!("\"{}\"", escape_string(s)),
            other => other.to_string(),
        }
    }
}

/// Numeric value of a string under loose comparison: blank is zero,
/// anything unparseable is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) =>
        {
            trimmed.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item.inspect())?;
                }
                write!(f, "]")
            }
            Value::Hash(hash) => {
                let Some(_walk) = hash.walk() else {
                    return write!(f, "{{...}}");
                };
                write!(f, "{{")?;
                for (i, (key, value)) in hash.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", key, value.inspect())?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "{}", func),
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// One parameter-list/body alternative of a user-defined function.
#[derive(Debug, Clone)]
pub struct FnVariant {
    pub params: Vec<Rc<str>>,
    pub body: Rc<[Node]>,
}

/// A function produced by `fn` or `defn`.
#[derive(Debug, Clone)]
pub struct Closure {
    pub name: Option<Rc<str>>,
    pub variants: Vec<FnVariant>,
}

pub enum FunctionKind {
    SpecialForm {
        name: &'static str,
        form: SpecialFormFn,
    },
    Native {
        name: Rc<str>,
        func: Box<NativeFnImpl>,
    },
    Closure(Closure),
}

/// A callable value. Clones share identity.
#[derive(Clone)]
pub struct Function {
    kind: Rc<FunctionKind>,
}

impl Function {
    pub fn special_form(name: &'static str, form: SpecialFormFn) -> Self {
        Function {
            kind: Rc::new(FunctionKind::SpecialForm { name, form }),
        }
    }

    pub fn native(
        name: impl Into<Rc<str>>,
        func: impl Fn(&Interpreter, &Scope, &[Value]) -> Result<Value> + 'static,
    ) -> Self {
        Function {
            kind: Rc::new(FunctionKind::Native {
                name: name.into(),
                func: Box::new(func),
            }),
        }
    }

    pub fn closure(closure: Closure) -> Self {
        Function {
            kind: Rc::new(FunctionKind::Closure(closure)),
        }
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    /// Special forms receive their operands as unevaluated syntax.
    pub fn is_special_form(&self) -> bool {
        matches!(*self.kind, FunctionKind::SpecialForm { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match &*self.kind {
            FunctionKind::SpecialForm { name, .. } => Some(*name),
            FunctionKind::Native { name, .. } => Some(name.as_ref()),
            FunctionKind::Closure(closure) => closure.name.as_deref(),
        }
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.kind, &other.kind)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            FunctionKind::SpecialForm { name, .. } => write!(f, "#<special-form {}>", name),
            FunctionKind::Native { name, .. } => write!(f, "#<native-fn {}>", name),
            FunctionKind::Closure(Closure { name: Some(name), .. }) => {
                write!(f, "#<fn {}>", name)
            }
            FunctionKind::Closure(_) => write!(f, "#<fn>"),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(-0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::string("0").is_truthy());
        assert!(Value::list(vec![]).is_truthy());
        assert!(Value::Hash(Hash::new()).is_truthy());
    }

    #[test]
    fn test_display() {
        let list = Value::list(vec![
            Value::Number(1.0),
            Value::string("a"),
            Value::list(vec![Value::Nil, Value::Bool(true)]),
        ]);
        assert_eq!(list.to_string(), r#"[1 "a" [nil true]]"#);
        assert_eq!(Value::string("raw").to_string(), "raw");
        assert_eq!(Value::string("q").inspect(), "\"q\"");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_hash_display() {
        let hash = Hash::from_flat(vec![
            Value::string("a"),
            Value::Number(1.0),
            Value::string("b"),
            Value::string("x"),
        ]);
        assert_eq!(Value::Hash(hash).to_string(), r#"{a 1, b "x"}"#);
    }

    #[test]
    fn test_self_containing_hash_display() {
        let hash = Hash::new();
        hash.set(Value::string("me"), Value::Hash(hash.clone()));
        hash.set(
            Value::string("in"),
            Value::list(vec![Value::Hash(hash.clone())]),
        );
        assert_eq!(Value::Hash(hash).to_string(), "{me {...}, in [{...}]}");
    }

    #[test]
    fn test_shared_hash_displays_twice() {
        let inner = Hash::from_flat(vec![Value::string("k"), Value::Number(1.0)]);
        let outer = Value::list(vec![Value::Hash(inner.clone()), Value::Hash(inner)]);
        assert_eq!(outer.to_string(), "[{k 1} {k 1}]");
    }

    #[test]
    fn test_strict_equality() {
        assert_eq!(
            Value::list(vec![Value::Number(1.0)]),
            Value::list(vec![Value::Number(1.0)])
        );
        assert_ne!(Value::Hash(Hash::new()), Value::Hash(Hash::new()));
        assert_ne!(Value::Number(1.0), Value::string("1"));
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::Number(1.0).loose_eq(&Value::string("1")));
        assert!(Value::string(" 2 ").loose_eq(&Value::Number(2.0)));
        assert!(Value::Bool(true).loose_eq(&Value::Number(1.0)));
        assert!(Value::Number(0.0).loose_eq(&Value::string("")));
        assert!(!Value::Nil.loose_eq(&Value::Number(0.0)));
        assert!(!Value::string("abc").loose_eq(&Value::Number(f64::NAN)));
        assert!(Value::Bool(false).loose_eq(&Value::Bool(false)));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Nil.type_name(), "Nil");
        assert_eq!(Value::list(vec![]).type_name(), "Array");
        assert_eq!(Value::Bool(true).type_name(), "Boolean");
    }

    #[test]
    fn test_function_identity_and_flag() {
        let f = Function::native("id", |_, _, args| Ok(args[0].clone()));
        let g = f.clone();
        assert!(f.ptr_eq(&g));
        assert!(!f.is_special_form());
        assert_eq!(f.to_string(), "#<native-fn id>");
        assert_eq!(Value::Function(f), Value::Function(g));
    }
}
