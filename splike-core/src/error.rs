// splike-core - Error types for the Splike evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Splike evaluation.
//!
//! Errors raised during evaluation are wrapped exactly once in
//! [`Error::Traced`] by the innermost evaluation frame that sees them.
//! Outer frames pass traced errors through untouched.

use std::fmt;

use splike_parser::ParseError;

/// Result type for Splike evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Malformed source text
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// `&` repeated, or not followed by exactly one rest parameter name
    #[error("Invalid use of &-operator.")]
    InvalidRestMarker,

    /// No variant of a function accepts the supplied arguments
    #[error("No matching call signature for {} with arguments ({args}).", display_name(.name))]
    NoMatchingSignature { name: Option<String>, args: String },

    /// Operator position evaluated to something that cannot be called
    #[error("{source_text} is not a function.")]
    NotCallable { source_text: String },

    /// Wrong kind of value for an operation
    #[error("{context}: {message}")]
    TypeError { context: String, message: String },

    /// Malformed special form
    #[error("Invalid '{form}' syntax: {message}")]
    InvalidSyntax { form: &'static str, message: String },

    /// Wrong number of arguments to a primitive or special form
    #[error("Wrong number of arguments to '{name}': expected {expected}, got {got}")]
    Arity {
        name: String,
        expected: AritySpec,
        got: usize,
    },

    /// Failure inside the host bridge
    #[error("{path}: {message}")]
    Host { path: String, message: String },

    /// Evaluation nested deeper than the configured limit
    #[error("Maximum call stack size exceeded (depth {depth})")]
    StackOverflow { depth: usize },

    /// Raised by `die`
    #[error("{0}")]
    Died(String),

    /// A source file could not be read
    #[error("{path}: {message}")]
    Io { path: String, message: String },

    /// A configuration value could not be understood
    #[error("invalid value `{value}` for {key}")]
    InvalidConfig { key: String, value: String },

    /// An error annotated with the evaluation trace
    #[error("{error}")]
    Traced { error: Box<Error>, trace: Vec<String> },
}

fn display_name(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("`{}`", name),
        None => "anonymous function".to_string(),
    }
}

/// Specification for expected arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl AritySpec {
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            AritySpec::Exact(k) => n == k,
            AritySpec::AtLeast(k) => n >= k,
            AritySpec::Range(min, max) => n >= min && n <= max,
        }
    }
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

impl Error {
    /// Create an arity error for a named primitive.
    pub fn arity(name: impl Into<String>, expected: AritySpec, got: usize) -> Self {
        Error::Arity {
            name: name.into(),
            expected,
            got,
        }
    }

    /// Create a type error with a free-form message.
    pub fn type_error(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TypeError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a type error for an operand of the wrong type.
    pub fn expected(context: impl Into<String>, expected: &str, got: &str) -> Self {
        Error::type_error(context, format!("expected {}, got {}", expected, got))
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }

    /// Create a host bridge error.
    pub fn host(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Host {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The underlying error, with any trace annotation removed.
    pub fn root(&self) -> &Error {
        match self {
            Error::Traced { error, .. } => error.root(),
            other => other,
        }
    }

    /// Trace lines, innermost frame first. Empty when not annotated.
    pub fn trace(&self) -> &[String] {
        match self {
            Error::Traced { trace, .. } => trace,
            _ => &[],
        }
    }

    pub fn is_traced(&self) -> bool {
        matches!(self, Error::Traced { .. })
    }

    /// Fatal errors stop the whole program rather than the current batch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.root(),
            Error::StackOverflow { .. } | Error::Died(_)
        )
    }

    /// The error class shown in reports.
    pub fn kind(&self) -> &'static str {
        match self.root() {
            Error::Syntax(_) | Error::InvalidRestMarker | Error::InvalidSyntax { .. } => {
                "SyntaxError"
            }
            Error::NoMatchingSignature { .. }
            | Error::NotCallable { .. }
            | Error::TypeError { .. }
            | Error::Arity { .. } => "TypeError",
            Error::Host { .. } => "HostError",
            Error::StackOverflow { .. } => "RangeError",
            Error::Died(_) => "Fatal",
            Error::Io { .. } => "IOError",
            Error::InvalidConfig { .. } => "ConfigError",
            Error::Traced { .. } => "Error",
        }
    }

    /// Render the error the way the shell prints it: the class and
    /// message on the first line, then one `at` line per traced frame.
    pub fn report(&self) -> String {
        let mut out = format!("{}: {}", self.kind(), self.root());
        for line in self.trace() {
            out.push_str("\n    at ");
            out.push_str(line);
        }
        out
    }
}
