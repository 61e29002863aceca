//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, and the [`parse_recurrence`] entry
//! point.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and coordination
//! - `terms`: grammar rules for the lhs signature and rhs summands
//! - `normalize`: merging of like terms once the rhs is parsed
//!
//! Parser methods are split across files using `impl Parser` blocks so each
//! module extends the Parser with related functionality while sharing state.

use crate::parser::ast::{Recurrence, SourceLocation};
use crate::parser::lexer::{LexError, Lexer, Token};
use crate::parser::normalize::normalize;
use thiserror::Error;

/// Parser error type
///
/// `fragment` is the offending substring of the whitespace-stripped input.
#[derive(Debug, Clone, Error)]
#[error("Parse error at {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub fragment: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            fragment: err.fragment,
            location: err.location,
        }
    }
}

/// Parse a recurrence relation such as `T(n) = 2*T(n-1) + T(n-2)`.
///
/// Like terms are merged before the [`Recurrence`] is built, so
/// `T(n) = T(n-1) + T(n-1)` yields a single `2*T(n-1)` term.
pub fn parse_recurrence(text: &str) -> Result<Recurrence, ParseError> {
    let mut parser = Parser::new(text)?;
    parser.parse_recurrence()
}

/// Recursive descent parser for recurrence text
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Whitespace-stripped source, indexed by token offsets
    pub(crate) text: Vec<char>,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            text: lexer.stripped(),
        })
    }

    /// Parse the whole input as `lhs "=" rhs`
    pub fn parse_recurrence(&mut self) -> Result<Recurrence, ParseError> {
        if self.is_at_end() {
            return Err(self.error_at(0, "Empty input", String::new()));
        }

        let equals: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| matches!(t, Token::Eq(_)))
            .map(|(i, _)| i)
            .collect();
        if equals.len() != 1 {
            let whole = self.slice(0, self.tokens.len() - 1);
            return Err(self.error_at(
                0,
                &format!("Expected exactly one '=': {}", whole),
                whole.clone(),
            ));
        }

        let eq = equals[0];
        if eq == 0 {
            return Err(self.error_at(0, "Empty left-hand side", String::new()));
        }
        if matches!(self.tokens[eq + 1], Token::Eof(_)) {
            return Err(self.error_at(eq + 1, "Empty right-hand side", String::new()));
        }

        let lhs = self.parse_lhs(eq)?;
        self.position = eq + 1;
        let raw = self.parse_rhs(&lhs)?;

        Recurrence::new(lhs, normalize(&raw)).map_err(|e| {
            let whole = self.slice(0, self.tokens.len() - 1);
            self.error_at(0, &e.to_string(), whole)
        })
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_at(&self, index: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Source text covered by tokens `start..end`
    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        let from = self.peek_at(start).location().offset;
        let to = self.peek_at(end).location().offset;
        if from >= to {
            return String::new();
        }
        self.text[from..to].iter().collect()
    }

    /// Index one past the run of adjacent word tokens starting at `start`,
    /// so `1T` or `n1x` is reported as a single fragment.
    pub(crate) fn word_end(&self, start: usize) -> usize {
        let mut end = start;
        while self.peek_at(end).is_word() {
            end += 1;
        }
        end
    }

    pub(crate) fn error_at(&self, index: usize, message: &str, fragment: String) -> ParseError {
        ParseError {
            message: message.to_string(),
            fragment,
            location: self.peek_at(index).location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Term;

    fn parse_err(text: &str) -> ParseError {
        parse_recurrence(text).expect_err("input should be rejected")
    }

    #[test]
    fn test_parse_simple_recurrence() {
        let rec = parse_recurrence("T(n) = T(n-1)").unwrap();

        assert_eq!(rec.function(), "T");
        assert_eq!(rec.variables(), &["n".to_string()]);
        assert_eq!(rec.lhs().shifts(), &[0.0]);
        assert_eq!(rec.rhs().len(), 1);
        match &rec.rhs()[0] {
            Term::Function(term) => {
                assert_eq!(term.coefficient(), 1.0);
                assert_eq!(term.function(), "T");
                assert_eq!(term.shifts(), &[-1.0]);
            }
            other => panic!("Expected function term, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_err("").message, "Empty input");
        assert_eq!(parse_err("  \t\n ").message, "Empty input");
    }

    #[test]
    fn test_equals_count() {
        assert!(parse_err("T(n)").message.starts_with("Expected exactly one '='"));
        let err = parse_err("T(n) = T(n-1) = T(n-2)");
        assert!(err.message.starts_with("Expected exactly one '='"));
        assert_eq!(err.fragment, "T(n)=T(n-1)=T(n-2)");
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(parse_err("= T(n-1)").message, "Empty left-hand side");
        assert_eq!(parse_err("T(n) = ").message, "Empty right-hand side");
    }

    #[test]
    fn test_error_location_refers_to_original_text() {
        let err = parse_err("T(n) =\n  S(n-1)");
        assert_eq!(err.location.line, 2);
        assert_eq!(err.location.column, 3);
    }
}
