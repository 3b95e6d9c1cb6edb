// splike-core - Parameter binding for user-defined functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Matches one function variant's parameter list against call arguments.
//!
//! A parameter list may contain a single `&` followed by the rest
//! parameter. Parameters before `&` bind from the front of the argument
//! list, parameters after the rest name bind from the back, and the rest
//! parameter receives whatever lies between:
//!
//! ```text
//! [a & rest b]  with (1 2 3 4)  =>  a = 1, rest = [2 3], b = 4
//! ```

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::Value;

/// The rest-parameter marker.
pub const REST_MARKER: &str = "&";

/// Bindings produced by a successful match, in the order they apply.
pub type Bindings = Vec<(Rc<str>, Value)>;

/// Try to bind `args` to `params`.
///
/// Returns `Ok(None)` when the argument count does not fit this variant,
/// and [`Error::InvalidRestMarker`] when `&` appears twice or last.
pub fn bind_parameters(params: &[Rc<str>], args: &[Value]) -> Result<Option<Bindings>> {
    let Some(rest_index) = params.iter().position(|p| &**p == REST_MARKER) else {
        if params.len() != args.len() {
            return Ok(None);
        }
        return Ok(Some(
            params.iter().cloned().zip(args.iter().cloned()).collect(),
        ));
    };

    let last_marker = params.iter().rposition(|p| &**p == REST_MARKER);
    if last_marker != Some(rest_index) || rest_index + 1 == params.len() {
        return Err(Error::InvalidRestMarker);
    }

    let leading = &params[..rest_index];
    let rest_name = &params[rest_index + 1];
    let trailing = &params[rest_index + 2..];
    let named = leading.len() + trailing.len();
    if args.len() < named {
        return Ok(None);
    }

    let tail_start = args.len() - trailing.len();
    let mut bindings = Bindings::with_capacity(named + 1);
    bindings.extend(leading.iter().cloned().zip(args.iter().cloned()));
    bindings.extend(trailing.iter().cloned().zip(args[tail_start..].iter().cloned()));
    bindings.push((
        rest_name.clone(),
        Value::list(args[rest_index..tail_start].iter().cloned()),
    ));
    Ok(Some(bindings))
}
