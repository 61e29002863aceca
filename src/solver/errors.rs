//! Solver error types
//!
//! [`UnsupportedInput`] is the only error a caller of the public solver sees.
//! [`RootFindingError`] stays inside the solver: every variant is turned into
//! [`Root::Infeasible`](crate::solver::Root::Infeasible) before returning.

use thiserror::Error;

/// A well-formed recurrence the single-variable solver and formatter reject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("only single-variable recurrences are supported, got {variables} variables")]
pub struct UnsupportedInput {
    pub variables: usize,
}

impl UnsupportedInput {
    /// Ok if the recurrence has exactly one variable.
    pub fn check(variables: usize) -> Result<(), UnsupportedInput> {
        if variables == 1 {
            Ok(())
        } else {
            Err(UnsupportedInput { variables })
        }
    }
}

/// Failure of an iterative root finder
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RootFindingError {
    #[error("f(a) and f(b) must have different signs: f({a}) = {fa}, f({b}) = {fb}")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("failed to converge after {iterations} iterations, last x = {x}")]
    NotConverged { iterations: usize, x: f64 },

    #[error("derivative vanished at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("step non-finite at x = {x}")]
    NonFiniteStep { x: f64 },
}
