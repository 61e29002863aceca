//! # Introduction
//!
//! recurtty parses linear recurrence relations such as
//! `T(n) = T(n-1) + T(n-2)`, finds the dominant root of their characteristic
//! equation, and reports the growth order as big-O notation. A solve can be
//! recorded step by step and replayed in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Text → Lexer → Parser → Recurrence → Solver → Root → Formatter
//!                                         ↓
//!                                     SolveTrace → TUI
//! ```
//!
//! 1. [`parser`]: tokenises the text, builds the term model and merges like
//!    terms into a normalized [`parser::Recurrence`].
//! 2. [`solver`]: brackets and solves `Σ c_j · r^(-d_j) = 1` for the dominant
//!    root, with a Newton fast path for warm-started batch solves.
//! 3. [`format`]: canonical recurrence text and `O(base^var)` rendering.
//! 4. [`cli`]: the command-line front end used by the binary.
//! 5. [`ui`]: ratatui trace explorer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use recurtty::format::format_asymptotics;
//! use recurtty::parser::parse_recurrence;
//! use recurtty::solver::solve_recurrence;
//!
//! let rec = parse_recurrence("T(n) = 2*T(n-1)").unwrap();
//! let root = solve_recurrence(&rec).unwrap();
//! assert_eq!(format_asymptotics(&rec, root).unwrap(), "O(2^n)");
//! ```

pub mod cli;
pub mod format;
pub mod parser;
pub mod solver;
pub mod ui;
