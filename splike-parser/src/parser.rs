// splike-parser - Parser for Splike
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for Splike source code.
//!
//! Converts tokens into `Node` trees. Every list form records the
//! location of its opening delimiter.

use std::rc::Rc;

use crate::lexer::{Lexer, LexerError, Token};
use crate::node::{Literal, Location, Node, Seq};

/// Deepest nesting of lists, vectors and hashes the reader accepts.
pub const MAX_NESTING: usize = 512;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} ({filename}:{line}:{column})")]
pub struct ParseError {
    pub message: String,
    pub filename: Rc<str>,
    pub line: usize,
    pub column: usize,
    /// The input ended inside an unclosed form or string
    pub incomplete: bool,
}

/// The parser converts tokens into `Node` trees.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    filename: Rc<str>,
    current: Token,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str, filename: impl Into<Rc<str>>) -> Result<Self, ParseError> {
        let filename = filename.into();
        let mut lexer = Lexer::new(source);
        let current = lexer
            .next_token()
            .map_err(|e| lexer_error(&filename, e))?;
        Ok(Parser {
            line: lexer.token_line(),
            column: lexer.token_column(),
            lexer,
            filename,
            current,
            depth: 0,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<Node>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        self.parse_form().map(Some)
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self
            .lexer
            .next_token()
            .map_err(|e| lexer_error(&self.filename, e))?;
        self.line = self.lexer.token_line();
        self.column = self.lexer.token_column();
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn location(&self) -> Location {
        Location::new(self.filename.clone(), self.line, self.column)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            filename: self.filename.clone(),
            line: self.line,
            column: self.column,
            incomplete: matches!(self.current, Token::Eof),
        }
    }

    fn parse_form(&mut self) -> Result<Node, ParseError> {
        match &self.current {
            Token::Nil => {
                self.advance()?;
                Ok(Node::Literal(Literal::Nil))
            }
            Token::True => {
                self.advance()?;
                Ok(Node::Literal(Literal::Bool(true)))
            }
            Token::False => {
                self.advance()?;
                Ok(Node::Literal(Literal::Bool(false)))
            }
            Token::Number(n) => {
                let n = *n;
                self.advance()?;
                Ok(Node::number(n))
            }
            Token::String(s) => {
                let node = Node::string(s.as_str());
                self.advance()?;
                Ok(node)
            }
            Token::Identifier(name) => {
                let node = Node::identifier(name.as_str());
                self.advance()?;
                Ok(node)
            }

            Token::LParen => self.nested(|p| p.parse_seq(Token::RParen).map(Node::List)),
            Token::QuoteParen => {
                self.nested(|p| p.parse_seq(Token::RParen).map(Node::QuotedList))
            }
            Token::LBracket => self.nested(Self::parse_vector),
            Token::LBrace => self.nested(Self::parse_hash),

            Token::RParen => Err(self.error("Unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("Unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("Unexpected '}'".to_string())),
            Token::Eof => Err(self.error("Unexpected end of input".to_string())),
        }
    }

    /// Run `parse` one nesting level deeper, failing past `MAX_NESTING`.
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Node, ParseError>,
    ) -> Result<Node, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(format!(
                "Forms nested deeper than {} levels",
                MAX_NESTING
            )));
        }
        self.depth += 1;
        let node = parse(self);
        self.depth -= 1;
        node
    }

    /// Collect forms up to `close`, consuming both delimiters.
    fn parse_items(&mut self, close: &Token) -> Result<Vec<Node>, ParseError> {
        self.advance()?; // consume the opening delimiter
        let mut items = Vec::new();
        while &self.current != close {
            if matches!(self.current, Token::Eof) {
                return Err(self.error(format!("Expected '{}' before end of input", close)));
            }
            items.push(self.parse_form()?);
        }
        self.advance()?;
        Ok(items)
    }

    fn parse_seq(&mut self, close: Token) -> Result<Seq, ParseError> {
        let location = self.location();
        let items = self.parse_items(&close)?;
        Ok(Seq::new(items, location))
    }

    fn parse_vector(&mut self) -> Result<Node, ParseError> {
        let items = self.parse_items(&Token::RBracket)?;
        Ok(Node::vector(items))
    }

    fn parse_hash(&mut self) -> Result<Node, ParseError> {
        self.advance()?; // consume {
        let mut pairs = Vec::new();

        while !matches!(self.current, Token::RBrace) {
            if matches!(self.current, Token::Eof) {
                return Err(self.error("Expected '}' before end of input".to_string()));
            }
            let key = self.parse_key()?;
            if matches!(self.current, Token::RBrace) {
                return Err(
                    self.error("Hash literal must contain an even number of forms".to_string())
                );
            }
            let value = self.parse_form()?;
            pairs.push((key, value));
        }

        self.advance()?; // consume }
        Ok(Node::Hash(pairs.into()))
    }

    fn parse_key(&mut self) -> Result<Literal, ParseError> {
        let key = match &self.current {
            Token::Nil => Literal::Nil,
            Token::True => Literal::Bool(true),
            Token::False => Literal::Bool(false),
            Token::Number(n) => Literal::Number(*n),
            Token::String(s) | Token::Identifier(s) => Literal::String(s.as_str().into()),
            Token::Eof => return Err(self.error("Unexpected end of input".to_string())),
            other => {
                return Err(self.error(format!("Hash keys must be atoms, found '{}'", other)));
            }
        };
        self.advance()?;
        Ok(key)
    }
}

fn lexer_error(filename: &Rc<str>, e: LexerError) -> ParseError {
    ParseError {
        message: e.message,
        filename: filename.clone(),
        line: e.line,
        column: e.column,
        incomplete: e.incomplete,
    }
}

/// Parse every top-level form in `source`.
pub fn parse(source: &str, filename: &str) -> Result<Vec<Node>, ParseError> {
    Parser::new(source, filename)?.parse_all()
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_identifier_reads_back(name in "[a-z][a-z0-9?!*<>=/._-]{0,12}") {
            prop_assume!(!matches!(name.as_str(), "nil" | "true" | "false"));
            let forms = parse(&name, "prop").unwrap();
            prop_assert_eq!(forms, vec![Node::identifier(name.as_str())]);
        }

        #[test]
        fn prop_unclosed_prefix_is_incomplete(depth in 1usize..20) {
            let source = "(f ".repeat(depth);
            let err = parse(&source, "prop").unwrap_err();
            prop_assert!(err.incomplete);
        }

        #[test]
        fn prop_integers_read_as_numbers(n in -1_000_000i64..1_000_000) {
            let forms = parse(&n.to_string(), "prop").unwrap();
            prop_assert_eq!(forms, vec![Node::number(n as f64)]);
        }
    }
}
