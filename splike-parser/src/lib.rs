// splike-parser - Lexer and parser for the Splike programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # splike-parser
//!
//! Lexer and parser for the Splike programming language.
//! Produces `Node` trees from source code strings.

pub mod lexer;
pub mod node;
pub mod parser;

pub use lexer::{Lexer, LexerError, Token};
pub use node::{Literal, Location, Node, Seq, escape_string, format_number};
pub use parser::{ParseError, Parser, parse};
