// splike-core - Host bridge
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Access to host functionality from Splike code.
//!
//! Three identifier shapes reach the host: `.-field` reads a field of its
//! first argument, `.method` calls a method on its first argument, and
//! `Namespace/member` calls a host global. All three go through a
//! [`HostBridge`]; nothing is looked up reflectively.
//!
//! [`StandardHost`] provides a fixed member table covering strings,
//! arrays, hashes, numbers and the `Math`, `Number`, `String`, `JSON` and
//! `console` namespaces.

pub mod json;

use std::io::Write;

use tracing::warn;

use crate::error::{Error, Result};
use crate::eval::Interpreter;
use crate::value::Value;

/// Namespaces served by [`StandardHost`].
pub const STANDARD_NAMESPACES: &[&str] = &["Math", "Number", "String", "JSON", "console"];

/// The interop surface between Splike code and its host.
pub trait HostBridge {
    /// Read field `name` of `object` (`(.-name object)`).
    fn field(&self, object: &Value, name: &str) -> Result<Value>;

    /// Call method `name` on `object` (`(.name object args...)`).
    fn method(&self, object: &Value, name: &str, args: &[Value]) -> Result<Value>;

    /// Call the global at `path` (`(Ns/member args...)`).
    fn global(&self, interp: &Interpreter, path: &[&str], args: &[Value]) -> Result<Value>;
}

/// The default host bridge.
#[derive(Debug, Clone, Default)]
pub struct StandardHost {
    allowed: Option<Vec<String>>,
}

impl StandardHost {
    /// A bridge with every namespace reachable.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bridge restricted to the given global namespaces. Field and
    /// method access is unaffected.
    pub fn with_namespaces(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        StandardHost {
            allowed: Some(allowed.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_allowed(&self, namespace: &str) -> bool {
        match &self.allowed {
            Some(allowed) => allowed.iter().any(|ns| ns == namespace),
            None => true,
        }
    }
}

impl HostBridge for StandardHost {
    fn field(&self, object: &Value, name: &str) -> Result<Value> {
        let path = format!(".-{}", name);
        match (object, name) {
            (Value::String(s), "length") => Ok(Value::Number(s.chars().count() as f64)),
            (Value::List(items), "length") => Ok(Value::Number(items.len() as f64)),
            (Value::Hash(hash), "size") => Ok(Value::Number(hash.len() as f64)),
            (Value::Nil, _) => Err(Error::host(path, "cannot read field of nil")),
            (other, _) => Err(Error::host(
                path,
                format!("{} has no field `{}`", other.type_name(), name),
            )),
        }
    }

    fn method(&self, object: &Value, name: &str, args: &[Value]) -> Result<Value> {
        let call = MethodCall {
            path: format!(".{}", name),
            args,
        };
        match object {
            Value::Hash(hash) => match name {
                "get" => Ok(hash.get(call.arg(0)?).unwrap_or(Value::Nil)),
                "set" => {
                    hash.set(call.arg(0)?.clone(), call.arg(1)?.clone());
                    Ok(object.clone())
                }
                "has" => Ok(Value::Bool(hash.has(call.arg(0)?))),
                "delete" | "del" => Ok(Value::Bool(hash.del(call.arg(0)?))),
                "keys" => Ok(Value::list(hash.keys())),
                "values" => Ok(Value::list(hash.values())),
                _ => Err(call.unknown(object)),
            },
            Value::String(s) => string_method(&call, s, name, object),
            Value::List(items) => {
                let items: Vec<Value> = items.iter().cloned().collect();
                array_method(&call, &items, name, object)
            }
            Value::Number(n) => match name {
                "toFixed" => {
                    let digits = match args.first() {
                        Some(d) => call.index(d)?,
                        None => 0,
                    };
                    if digits > 100 {
                        return Err(Error::host(call.path, "digits must be between 0 and 100"));
                    }
                    Ok(Value::string(format!("{:.*}", digits, n)))
                }
                "toString" => Ok(Value::string(object.to_string())),
                _ => Err(call.unknown(object)),
            },
            Value::Nil => Err(Error::host(call.path, "cannot call method on nil")),
            _ => Err(call.unknown(object)),
        }
    }

    fn global(&self, interp: &Interpreter, path: &[&str], args: &[Value]) -> Result<Value> {
        let call = MethodCall {
            path: path.join("/"),
            args,
        };
        let (namespace, member) = match path {
            [namespace, member] => (*namespace, *member),
            _ => return Err(Error::host(call.path, "unknown host global")),
        };
        if !self.is_allowed(namespace) {
            warn!(namespace, path = %call.path, "host namespace denied");
            return Err(Error::host(
                call.path,
                format!("namespace `{}` is not allowed", namespace),
            ));
        }

        match namespace {
            "Math" => math_global(&call, member),
            "Number" => number_global(&call, member),
            "String" => match member {
                "fromCharCode" => args
                    .iter()
                    .map(|code| {
                        let code = call.number(code)?;
                        Ok(char::from_u32(code as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
                    })
                    .collect::<Result<String>>()
                    .map(Value::string),
                _ => Err(Error::host(call.path, "unknown host global")),
            },
            "JSON" => match member {
                "stringify" => {
                    let json = json::to_json(call.arg(0)?)
                        .map_err(|e| Error::host(call.path.clone(), e.to_string()))?;
                    serde_json::to_string(&json)
                        .map(Value::string)
                        .map_err(|e| Error::host(call.path.clone(), e.to_string()))
                }
                "parse" => {
                    let text = call.string(call.arg(0)?)?;
                    serde_json::from_str::<serde_json::Value>(text)
                        .map(|json| json::from_json(&json))
                        .map_err(|e| Error::host(call.path.clone(), e.to_string()))
                }
                _ => Err(Error::host(call.path, "unknown host global")),
            },
            "console" => {
                let line = args
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                match member {
                    "log" => interp.write_line(&line)?,
                    "error" => writeln!(std::io::stderr(), "{}", line).map_err(|e| Error::Io {
                        path: "<stderr>".to_string(),
                        message: e.to_string(),
                    })?,
                    _ => return Err(Error::host(call.path, "unknown host global")),
                }
                Ok(Value::Nil)
            }
            _ => Err(Error::host(call.path, "unknown host global")),
        }
    }
}

// ============================================================================
// Member tables
// ============================================================================

/// Arguments of one host call, for argument checking.
struct MethodCall<'a> {
    path: String,
    args: &'a [Value],
}

impl<'a> MethodCall<'a> {
    fn arg(&self, i: usize) -> Result<&'a Value> {
        self.args.get(i).ok_or_else(|| {
            Error::host(
                self.path.clone(),
                format!("missing argument {}", i + 1),
            )
        })
    }

    fn number(&self, value: &Value) -> Result<f64> {
        value.as_number().ok_or_else(|| {
            Error::host(
                self.path.clone(),
                format!("expected Number, got {}", value.type_name()),
            )
        })
    }

    fn string<'v>(&self, value: &'v Value) -> Result<&'v str> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::host(
                self.path.clone(),
                format!("expected String, got {}", other.type_name()),
            )),
        }
    }

    fn index(&self, value: &Value) -> Result<usize> {
        let n = self.number(value)?;
        if n < 0.0 || n.is_nan() {
            return Err(Error::host(self.path.clone(), "expected a non-negative number"));
        }
        Ok(n.trunc() as usize)
    }

    /// Start and end of `.slice` over a sequence of `len` elements.
    /// Negative positions count from the end.
    fn slice_bounds(&self, len: usize) -> Result<(usize, usize)> {
        let relative = |value: Option<&Value>, default: usize| -> Result<usize> {
            let Some(value) = value else {
                return Ok(default);
            };
            let n = self.number(value)?.trunc();
            Ok(if n < 0.0 {
                (len as f64 + n).max(0.0) as usize
            } else {
                n.min(len as f64) as usize
            })
        };
        let start = relative(self.args.first(), 0)?;
        let end = relative(self.args.get(1), len)?;
        Ok((start, end.max(start)))
    }

    fn unknown(&self, object: &Value) -> Error {
        Error::host(
            self.path.clone(),
            format!("{} has no method `{}`", object.type_name(), &self.path[1..]),
        )
    }
}

fn string_method(call: &MethodCall, s: &str, name: &str, object: &Value) -> Result<Value> {
    let chars: Vec<char> = s.chars().collect();
    match name {
        "toUpperCase" => Ok(Value::string(s.to_uppercase())),
        "toLowerCase" => Ok(Value::string(s.to_lowercase())),
        "trim" => Ok(Value::string(s.trim())),
        "split" => {
            let sep = call.string(call.arg(0)?)?;
            let parts: Vec<Value> = if sep.is_empty() {
                chars.iter().map(|c| Value::string(c.to_string())).collect()
            } else {
                s.split(sep).map(Value::string).collect()
            };
            Ok(Value::list(parts))
        }
        "includes" => Ok(Value::Bool(s.contains(call.string(call.arg(0)?)?))),
        "startsWith" => Ok(Value::Bool(s.starts_with(call.string(call.arg(0)?)?))),
        "endsWith" => Ok(Value::Bool(s.ends_with(call.string(call.arg(0)?)?))),
        "slice" => {
            let (start, end) = call.slice_bounds(chars.len())?;
            Ok(Value::string(chars[start..end].iter().collect::<String>()))
        }
        "indexOf" => {
            let needle = call.string(call.arg(0)?)?;
            let position = s
                .find(needle)
                .map(|byte| s[..byte].chars().count() as f64)
                .unwrap_or(-1.0);
            Ok(Value::Number(position))
        }
        "charAt" => {
            let i = call.index(call.arg(0)?)?;
            Ok(Value::string(
                chars.get(i).map(|c| c.to_string()).unwrap_or_default(),
            ))
        }
        "concat" => {
            let mut out = s.to_string();
            for arg in call.args {
                out.push_str(&arg.to_string());
            }
            Ok(Value::string(out))
        }
        _ => Err(call.unknown(object)),
    }
}

fn array_method(call: &MethodCall, items: &[Value], name: &str, object: &Value) -> Result<Value> {
    match name {
        "join" => {
            let sep = match call.args.first() {
                Some(sep) => call.string(sep)?,
                None => ",",
            };
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::Nil => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(sep);
            Ok(Value::string(joined))
        }
        "slice" => {
            let (start, end) = call.slice_bounds(items.len())?;
            Ok(Value::list(items[start..end].iter().cloned()))
        }
        "concat" => {
            let mut out = items.to_vec();
            for arg in call.args {
                match arg {
                    Value::List(more) => out.extend(more.iter().cloned()),
                    other => out.push(other.clone()),
                }
            }
            Ok(Value::list(out))
        }
        "indexOf" => {
            let needle = call.arg(0)?;
            let position = items
                .iter()
                .position(|item| item == needle)
                .map(|i| i as f64)
                .unwrap_or(-1.0);
            Ok(Value::Number(position))
        }
        "includes" => {
            let needle = call.arg(0)?;
            Ok(Value::Bool(
                items.iter().any(|item| item.same_value_zero(needle)),
            ))
        }
        "reverse" => Ok(Value::list(items.iter().rev().cloned())),
        _ => Err(call.unknown(object)),
    }
}

fn math_global(call: &MethodCall, member: &str) -> Result<Value> {
    let unary = |f: fn(f64) -> f64| -> Result<Value> {
        Ok(Value::Number(f(call.number(call.arg(0)?)?)))
    };
    match member {
        "floor" => unary(f64::floor),
        "ceil" => unary(f64::ceil),
        "round" => unary(|x| (x + 0.5).floor()),
        "trunc" => unary(f64::trunc),
        "abs" => unary(f64::abs),
        "sqrt" => unary(f64::sqrt),
        "sign" => unary(|x| {
            if x.is_nan() || x == 0.0 {
                x
            } else {
                x.signum()
            }
        }),
        "pow" => {
            let base = call.number(call.arg(0)?)?;
            let exponent = call.number(call.arg(1)?)?;
            Ok(Value::Number(base.powf(exponent)))
        }
        "min" | "max" => {
            let is_min = member == "min";
            let mut acc = if is_min {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
            for arg in call.args {
                let n = call.number(arg)?;
                if n.is_nan() {
                    return Ok(Value::Number(f64::NAN));
                }
                acc = if is_min { acc.min(n) } else { acc.max(n) };
            }
            Ok(Value::Number(acc))
        }
        _ => Err(Error::host(call.path.clone(), "unknown host global")),
    }
}

fn number_global(call: &MethodCall, member: &str) -> Result<Value> {
    match member {
        "parseFloat" => {
            let text = call.arg(0)?.to_string();
            Ok(Value::Number(parse_float_prefix(&text)))
        }
        "isInteger" => Ok(Value::Bool(matches!(
            call.arg(0)?,
            Value::Number(n) if n.is_finite() && n.fract() == 0.0
        ))),
        "isNaN" => Ok(Value::Bool(matches!(
            call.arg(0)?,
            Value::Number(n) if n.is_nan()
        ))),
        _ => Err(Error::host(call.path.clone(), "unknown host global")),
    }
}

/// The longest leading decimal literal of `text`, or `NaN` if there is none.
fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    for prefix in ["Infinity", "+Infinity"] {
        if trimmed.starts_with(prefix) {
            return f64::INFINITY;
        }
    }
    if trimmed.starts_with("-Infinity") {
        return f64::NEG_INFINITY;
    }
    (1..=trimmed.len())
        .rev()
        .filter(|&end| trimmed.is_char_boundary(end))
        .find_map(|end| {
            let candidate = &trimmed[..end];
            let numeric = candidate
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
            if numeric {
                candidate.parse::<f64>().ok()
            } else {
                None
            }
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Hash;

    fn s(text: &str) -> Value {
        Value::string(text)
    }

    fn n(x: f64) -> Value {
        Value::Number(x)
    }

    #[test]
    fn test_length_fields() {
        let host = StandardHost::new();
        assert_eq!(host.field(&s("héllo"), "length").unwrap(), n(5.0));
        assert_eq!(
            host.field(&Value::list(vec![n(1.0), n(2.0)]), "length")
                .unwrap(),
            n(2.0)
        );
        let hash = Hash::from_flat(vec![s("a"), n(1.0)]);
        assert_eq!(host.field(&Value::Hash(hash), "size").unwrap(), n(1.0));
    }

    #[test]
    fn test_unknown_field_names_path() {
        let err = StandardHost::new().field(&n(1.0), "length").unwrap_err();
        assert!(matches!(&err, Error::Host { path, .. } if path == ".-length"));
    }

    #[test]
    fn test_hash_methods_mutate_shared_storage() {
        let host = StandardHost::new();
        let hash = Value::Hash(Hash::new());
        host.method(&hash, "set", &[s("k"), n(1.0)]).unwrap();
        assert_eq!(host.method(&hash, "get", &[s("k")]).unwrap(), n(1.0));
        assert_eq!(host.method(&hash, "has", &[s("k")]).unwrap(), Value::Bool(true));
        assert_eq!(host.method(&hash, "del", &[s("k")]).unwrap(), Value::Bool(true));
        assert_eq!(host.method(&hash, "get", &[s("k")]).unwrap(), Value::Nil);
    }

    #[test]
    fn test_string_methods() {
        let host = StandardHost::new();
        assert_eq!(host.method(&s("abc"), "toUpperCase", &[]).unwrap(), s("ABC"));
        assert_eq!(
            host.method(&s("a,b"), "split", &[s(",")]).unwrap(),
            Value::list(vec![s("a"), s("b")])
        );
        assert_eq!(host.method(&s("hello"), "slice", &[n(-3.0)]).unwrap(), s("llo"));
        assert_eq!(host.method(&s("hello"), "indexOf", &[s("l")]).unwrap(), n(2.0));
        assert_eq!(host.method(&s("hello"), "charAt", &[n(9.0)]).unwrap(), s(""));
    }

    #[test]
    fn test_array_methods() {
        let host = StandardHost::new();
        let list = Value::list(vec![n(1.0), Value::Nil, s("x")]);
        assert_eq!(host.method(&list, "join", &[s("-")]).unwrap(), s("1--x"));
        assert_eq!(host.method(&list, "indexOf", &[s("x")]).unwrap(), n(2.0));
        assert_eq!(
            host.method(&list, "reverse", &[]).unwrap(),
            Value::list(vec![s("x"), Value::Nil, n(1.0)])
        );
    }

    #[test]
    fn test_number_methods() {
        let host = StandardHost::new();
        assert_eq!(host.method(&n(3.14159), "toFixed", &[n(2.0)]).unwrap(), s("3.14"));
        assert_eq!(host.method(&n(42.0), "toString", &[]).unwrap(), s("42"));
    }

    #[test]
    fn test_unknown_method() {
        let err = StandardHost::new().method(&n(1.0), "frobnicate", &[]).unwrap_err();
        assert_eq!(err.to_string(), ".frobnicate: Number has no method `frobnicate`");
    }

    #[test]
    fn test_allow_list() {
        let host = StandardHost::with_namespaces(["Math"]);
        assert!(host.is_allowed("Math"));
        assert!(!host.is_allowed("console"));
        for ns in STANDARD_NAMESPACES {
            assert!(StandardHost::new().is_allowed(ns));
        }
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("3.5px"), 3.5);
        assert_eq!(parse_float_prefix("  -2e3"), -2000.0);
        assert!(parse_float_prefix("abc").is_nan());
    }
}
