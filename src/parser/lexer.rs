//! Lexer (tokenizer) for recurrence text
//!
//! Whitespace carries no meaning in a recurrence, so the lexer first strips it
//! (remembering where each surviving character sat in the original text) and
//! then tokenizes the stripped stream. Identifier scanning goes through an
//! explicit Unicode code-point classifier rather than a regex engine.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Whether `ch` may start an identifier (any Unicode letter).
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic()
}

/// Whether `ch` may continue an identifier: Unicode letters and digits plus
/// `_`, `{` and `}` for subscript-style names such as `n_{1}`.
pub fn is_identifier_continue(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric() || matches!(ch, '_' | '{' | '}')
}

/// Check if a string is a valid function or variable name.
///
/// ```
/// use recurtty::parser::lexer::is_valid_identifier;
///
/// assert!(is_valid_identifier("α"));
/// assert!(is_valid_identifier("T_{ij}"));
/// assert!(!is_valid_identifier("_foo"));
/// ```
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_continue),
        _ => false,
    }
}

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`]; the token's text runs from its
/// own offset up to the offset of the following token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Unsigned numeric literal: `digits ["." digits]`
    Number(f64, SourceLocation),
    Ident(String, SourceLocation),

    Plus(SourceLocation),   // +
    Minus(SourceLocation),  // -
    Star(SourceLocation),   // *
    Comma(SourceLocation),  // ,
    Eq(SourceLocation),     // =
    LParen(SourceLocation), // (
    RParen(SourceLocation), // )

    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Number(_, loc)
            | Token::Ident(_, loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Comma(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// True for tokens that can be part of a bare word (`2T`, `n1`).
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Number(..) | Token::Ident(..))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n, _) => write!(f, "number {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub fragment: String,
    pub location: SourceLocation,
}

/// Lexer for recurrence text
pub struct Lexer {
    /// Non-whitespace characters with their original line and column
    input: Vec<(char, usize, usize)>,
    position: usize,
    end_line: usize,
    end_column: usize,
}

impl Lexer {
    /// Create a new lexer, stripping all whitespace from `input`.
    pub fn new(input: &str) -> Self {
        let mut chars = Vec::new();
        let mut line = 1;
        let mut column = 1;

        for ch in input.chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
                continue;
            }
            if !ch.is_whitespace() {
                chars.push((ch, line, column));
            }
            column += 1;
        }

        Self {
            input: chars,
            position: 0,
            end_line: line,
            end_column: column,
        }
    }

    /// The whitespace-free text the tokens index into.
    pub fn stripped(&self) -> Vec<char> {
        self.input.iter().map(|&(ch, _, _)| ch).collect()
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            tokens.push(self.next_token()?);
        }
        tokens.push(Token::Eof(self.current_location()));

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            fragment: String::new(),
            location: loc,
        })?;

        match ch {
            '0'..='9' => self.number_literal(ch, loc),
            '+' => Ok(Token::Plus(loc)),
            '-' => Ok(Token::Minus(loc)),
            '*' => Ok(Token::Star(loc)),
            ',' => Ok(Token::Comma(loc)),
            '=' => Ok(Token::Eq(loc)),
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            c if is_identifier_start(c) => Ok(self.identifier(c, loc)),
            c if is_identifier_continue(c) => {
                // `_foo`, `{x}`: report the whole would-be identifier
                let word = self.identifier(c, loc);
                let fragment = match word {
                    Token::Ident(s, _) => s,
                    _ => c.to_string(),
                };
                Err(LexError {
                    message: format!(
                        "Invalid identifier '{}': identifiers must start with a letter",
                        fragment
                    ),
                    fragment,
                    location: loc,
                })
            }
            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                fragment: ch.to_string(),
                location: loc,
            }),
        }
    }

    /// Parse numeric literal: digits with an optional fractional part
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.consume_digits(&mut num_str);

        if self.peek() == Some('.') {
            num_str.push('.');
            self.advance();
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(LexError {
                    message: format!("Malformed number '{}': expected digits after '.'", num_str),
                    fragment: num_str,
                    location: loc,
                });
            }
            self.consume_digits(&mut num_str);
        }

        let value = num_str.parse::<f64>().map_err(|_| LexError {
            message: format!("Invalid numeric literal: {}", num_str),
            fragment: num_str.clone(),
            location: loc,
        })?;

        Ok(Token::Number(value, loc))
    }

    fn consume_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume the rest of an identifier starting with `first_char`
    fn identifier(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if is_identifier_continue(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Ident(ident, loc)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).map(|&(ch, _, _)| ch)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        match self.input.get(self.position) {
            Some(&(_, line, column)) => SourceLocation::new(line, column, self.position),
            None => SourceLocation::new(self.end_line, self.end_column, self.position),
        }
    }
}
