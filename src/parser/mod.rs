//! Recurrence text parser
//!
//! This module transforms recurrence text into a normalized [`Recurrence`]:
//! - [`lexer`]: Tokenization (text → tokens), including the identifier classifier
//! - [`parse`]: Parser coordinator and the [`parse_recurrence`] entry point
//! - `terms`: grammar rules for the lhs signature and rhs summands
//! - [`normalize`]: merging of like terms
//! - [`ast`]: the term model
//!
//! # Accepted grammar
//!
//! All whitespace is stripped first. Identifiers start with a Unicode letter
//! and continue with letters, digits, `_`, `{` or `}`.
//!
//! ```text
//! T(n) = T(n-1) + T(n-2)
//! D(m, n) = D(m-1, n) + D(m, n-1) + D(m-1, n-1)
//! T(n) = 2*T(n-1) - T(n-2) + 5
//! ```
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent over a flat token stream. No regex engine or
//! parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod normalize;
pub mod parse;
mod terms;

pub use ast::{ConstantTerm, FunctionTerm, ModelError, Recurrence, Term};
pub use parse::{parse_recurrence, ParseError};
