// splike-parser - Syntax tree for Splike
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The `Node` tree produced by the reader.
//!
//! Nodes are plain data. Child sequences are reference counted so that the
//! evaluator can keep a function body alive without copying the tree.

use std::fmt;
use std::rc::Rc;

/// Where a form starts in its source file (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub filename: Rc<str>,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(filename: impl Into<Rc<str>>, line: usize, column: usize) -> Self {
        Location {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// The items of a `(...)` or `'(...)` form together with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Seq {
    pub items: Rc<[Node]>,
    pub location: Location,
}

impl Seq {
    pub fn new(items: Vec<Node>, location: Location) -> Self {
        Seq {
            items: items.into(),
            location,
        }
    }

    /// The operator position, if the form is not empty.
    pub fn head(&self) -> Option<&Node> {
        self.items.first()
    }

    /// Everything after the operator position.
    pub fn operands(&self) -> &[Node] {
        self.items.get(1..).unwrap_or(&[])
    }
}

/// Self-evaluating atoms: the reader's pre-evaluated payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => write!(f, "nil"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", format_number(*n)),
            Literal::String(s) => write!(f, "\"{}\"", escape_string(s)),
        }
    }
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// String literal
    String(Rc<str>),
    /// Identifier, resolved at evaluation time
    Identifier(Rc<str>),
    /// `(op args...)` - a call
    List(Seq),
    /// `'(a b c)` - a literal sequence, every element evaluated
    QuotedList(Seq),
    /// `[a b c]` - a literal sequence, every element evaluated
    Vector(Rc<[Node]>),
    /// `{k v ...}` - keys are stored unevaluated
    Hash(Rc<[(Literal, Node)]>),
    /// Numbers, booleans and nil
    Literal(Literal),
}

impl Node {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Node::String(s.into())
    }

    pub fn identifier(name: impl Into<Rc<str>>) -> Self {
        Node::Identifier(name.into())
    }

    pub fn number(n: f64) -> Self {
        Node::Literal(Literal::Number(n))
    }

    pub fn vector(items: Vec<Node>) -> Self {
        Node::Vector(items.into())
    }

    /// The identifier text, if this node is an identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Node::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Source location of list-like forms.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Node::List(seq) | Node::QuotedList(seq) => Some(&seq.location),
            _ => None,
        }
    }

    /// Human-readable kind, used in syntax error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::String(_) => "string",
            Node::Identifier(_) => "identifier",
            Node::List(_) => "list",
            Node::QuotedList(_) => "quoted list",
            Node::Vector(_) => "vector",
            Node::Hash(_) => "hash",
            Node::Literal(Literal::Number(_)) => "number",
            Node::Literal(Literal::Bool(_)) => "boolean",
            Node::Literal(_) => "literal",
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Node]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Node::Identifier(name) => write!(f, "{}", name),
            Node::List(seq) => {
                write!(f, "(")?;
                write_items(f, &seq.items)?;
                write!(f, ")")
            }
            Node::QuotedList(seq) => {
                write!(f, "'(")?;
                write_items(f, &seq.items)?;
                write!(f, ")")
            }
            Node::Vector(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
            Node::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{} {}", key, value)?;
                }
                write!(f, "}}")
            }
            Node::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

/// Format a number the way the language prints it: integral values
/// have no fractional part, and the IEEE specials are spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // Covers -0 as well
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// Escape a string for display inside double quotes.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
