// splike-parser - Lexer for Splike
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for Splike source code.
//!
//! Converts a source string into a stream of tokens, tracking the
//! line and column at which each token starts.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,      // (
    RParen,      // )
    LBracket,    // [
    RBracket,    // ]
    LBrace,      // {
    RBrace,      // }
    QuoteParen,  // '(

    // Literals
    Nil,
    True,
    False,
    Number(f64),
    String(String),
    Identifier(String),

    // Special
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::QuoteParen => write!(f, "'("),
            Token::Nil => write!(f, "nil"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Number(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at {line}:{column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    /// The input ended before the token was complete
    pub incomplete: bool,
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    token_line: usize,
    token_column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();
        self.token_line = self.line;
        self.token_column = self.column;

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            '[' => {
                self.advance();
                Ok(Token::LBracket)
            }
            ']' => {
                self.advance();
                Ok(Token::RBracket)
            }
            '{' => {
                self.advance();
                Ok(Token::LBrace)
            }
            '}' => {
                self.advance();
                Ok(Token::RBrace)
            }
            '\'' => {
                self.advance();
                match self.peek() {
                    Some('(') => {
                        self.advance();
                        Ok(Token::QuoteParen)
                    }
                    None => Err(self.incomplete("Unexpected end of input after '".to_string())),
                    Some(other) => Err(self.error(format!("Expected '(' after ', found '{}'", other))),
                }
            }
            '"' => self.read_string(),
            '-' | '+' => self.read_number_or_identifier(),
            '0'..='9' => self.read_number(),
            _ => self.read_identifier(),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Line at which the most recent token started (1-indexed).
    pub fn token_line(&self) -> usize {
        self.token_line
    }

    /// Column at which the most recent token started (1-indexed).
    pub fn token_column(&self) -> usize {
        self.token_column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
            incomplete: false,
        }
    }

    fn incomplete(&self, message: String) -> LexerError {
        LexerError {
            incomplete: true,
            ..self.error(message)
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_string(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume opening "
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('\\') => s.push('\\'),
                    Some('"') => s.push('"'),
                    Some(c) => return Err(self.error(format!("Unknown escape sequence: \\{}", c))),
                    None => return Err(self.incomplete("Unterminated string escape".to_string())),
                },
                Some(c) => s.push(c),
                None => return Err(self.incomplete("Unterminated string".to_string())),
            }
        }

        Ok(Token::String(s))
    }

    fn read_number_or_identifier(&mut self) -> Result<Token, LexerError> {
        let mut lookahead = self.chars.clone();
        lookahead.next(); // the sign
        match lookahead.next() {
            Some(c) if c.is_ascii_digit() => self.read_number(),
            _ => self.read_identifier(),
        }
    }

    fn read_number(&mut self) -> Result<Token, LexerError> {
        let mut text = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek() {
            text.push(sign);
            self.advance();
        }
        self.read_digits(&mut text);

        if self.peek() == Some('.') {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        if let Some(e @ ('e' | 'E')) = self.peek() {
            text.push(e);
            self.advance();
            if let Some(sign @ ('-' | '+')) = self.peek() {
                text.push(sign);
                self.advance();
            }
            self.read_digits(&mut text);
        }

        if let Some(c) = self.peek()
            && !is_terminator(c)
        {
            return Err(self.error(format!("Invalid number: {}{}", text, c)));
        }

        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| self.error(format!("Invalid number: {}", text)))
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> Result<Token, LexerError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_terminator(c) {
                break;
            }
            name.push(c);
            self.advance();
        }

        if name.is_empty() {
            // Only reachable for characters the dispatch above does not claim
            return Err(self.error("Unexpected character".to_string()));
        }

        Ok(match name.as_str() {
            "nil" => Token::Nil,
            "true" => Token::True,
            "false" => Token::False,
            _ => Token::Identifier(name),
        })
    }
}

/// Characters that end an identifier or number.
fn is_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '"' | '\'' | '(' | ')' | '[' | ']' | '{' | '}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(s: &str) -> Vec<Token> {
        Lexer::new(s).tokenize().unwrap()
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            lex("( ) [ ] { } '("),
            vec![
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
                Token::QuoteParen,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("42"), vec![Token::Number(42.0)]);
        assert_eq!(lex("-7"), vec![Token::Number(-7.0)]);
        assert_eq!(lex("+3.5"), vec![Token::Number(3.5)]);
        assert_eq!(lex("1e3"), vec![Token::Number(1000.0)]);
        assert_eq!(lex("0.125"), vec![Token::Number(0.125)]);
    }

    #[test]
    fn test_sign_alone_is_identifier() {
        assert_eq!(
            lex("- + -x"),
            vec![
                Token::Identifier("-".to_string()),
                Token::Identifier("+".to_string()),
                Token::Identifier("-x".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_number() {
        let err = Lexer::new("12abc").tokenize().unwrap_err();
        assert!(err.message.contains("Invalid number"));
        assert!(!err.incomplete);
    }

    #[test]
    fn test_identifiers_with_sugar_characters() {
        assert_eq!(
            lex(".-size .toUpperCase Math/floor defined? &"),
            vec![
                Token::Identifier(".-size".to_string()),
                Token::Identifier(".toUpperCase".to_string()),
                Token::Identifier("Math/floor".to_string()),
                Token::Identifier("defined?".to_string()),
                Token::Identifier("&".to_string()),
            ]
        );
    }

    #[test]
    fn test_keywords_literals() {
        assert_eq!(lex("nil true false"), vec![Token::Nil, Token::True, Token::False]);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            lex(r#""a\n\"b\"\\""#),
            vec![Token::String("a\n\"b\"\\".to_string())]
        );
    }

    #[test]
    fn test_unterminated_string_is_incomplete() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert!(err.incomplete);
    }

    #[test]
    fn test_bad_escape_is_not_incomplete() {
        let err = Lexer::new(r#""\q""#).tokenize().unwrap_err();
        assert!(!err.incomplete);
    }

    #[test]
    fn test_quote_requires_paren() {
        let err = Lexer::new("'x").tokenize().unwrap_err();
        assert!(err.message.contains("Expected '('"));
    }

    #[test]
    fn test_comments_and_commas() {
        assert_eq!(
            lex("; comment\n1, 2 ; trailing"),
            vec![Token::Number(1.0), Token::Number(2.0)]
        );
    }

    #[test]
    fn test_token_positions() {
        let mut lexer = Lexer::new("(a\n  b)");
        assert_eq!(lexer.next_token().unwrap(), Token::LParen);
        assert_eq!((lexer.token_line(), lexer.token_column()), (1, 1));
        lexer.next_token().unwrap();
        assert_eq!((lexer.token_line(), lexer.token_column()), (1, 2));
        lexer.next_token().unwrap();
        assert_eq!((lexer.token_line(), lexer.token_column()), (2, 3));
    }
}
