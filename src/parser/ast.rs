// Term model for parsed recurrences

use crate::parser::lexer::is_valid_identifier;
use std::fmt;
use thiserror::Error;

/// Source location information for error reporting.
///
/// `line` and `column` refer to the original input text, before whitespace
/// is stripped. `offset` indexes the stripped character stream and is used to
/// slice offending fragments back out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Violations of the term model invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("variables and shifts must have same length: {variables} vs {shifts}")]
    ArityMismatch { variables: usize, shifts: usize },

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("lhs coefficient must be 1, got {0}")]
    LhsCoefficient(f64),

    #[error("lhs shifts must all be 0, got {0:?}")]
    LhsShift(Vec<f64>),

    #[error("duplicate variable name '{0}'")]
    DuplicateVariable(String),

    #[error("rhs term uses function '{found}', expected '{expected}'")]
    ForeignFunction { expected: String, found: String },

    #[error("rhs term variables {found:?} do not match lhs variables {expected:?}")]
    VariableMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// A function call with coefficient: `coefficient * function(vars + shifts)`.
///
/// `2*T(n-1, m)` has coefficient 2, function `T`, variables `[n, m]` and
/// shifts `[-1, 0]`. The shift list is parallel to the variable list.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTerm {
    coefficient: f64,
    function: String,
    variables: Vec<String>,
    shifts: Vec<f64>,
}

impl FunctionTerm {
    pub fn new(
        coefficient: f64,
        function: impl Into<String>,
        variables: Vec<String>,
        shifts: Vec<f64>,
    ) -> Result<Self, ModelError> {
        let function = function.into();
        if variables.len() != shifts.len() {
            return Err(ModelError::ArityMismatch {
                variables: variables.len(),
                shifts: shifts.len(),
            });
        }
        if let Some(bad) = std::iter::once(&function)
            .chain(variables.iter())
            .find(|name| !is_valid_identifier(name))
        {
            return Err(ModelError::InvalidIdentifier(bad.clone()));
        }

        Ok(Self {
            coefficient,
            function,
            variables,
            shifts,
        })
    }

    /// Build the signature term `function(variables)` with unit coefficient
    /// and all-zero shifts.
    pub fn signature(
        function: impl Into<String>,
        variables: Vec<String>,
    ) -> Result<Self, ModelError> {
        let shifts = vec![0.0; variables.len()];
        Self::new(1.0, function, variables, shifts)
    }

    /// Copy of this term with a different coefficient.
    pub fn with_coefficient(&self, coefficient: f64) -> Self {
        Self {
            coefficient,
            ..self.clone()
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn shifts(&self) -> &[f64] {
        &self.shifts
    }

    pub fn arity(&self) -> usize {
        self.variables.len()
    }
}

/// A constant summand on the rhs, e.g. the `5` in `T(n) = T(n-1) + 5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTerm {
    pub coefficient: f64,
}

impl ConstantTerm {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }
}

/// One rhs summand
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Function(FunctionTerm),
    Constant(ConstantTerm),
}

impl Term {
    pub fn coefficient(&self) -> f64 {
        match self {
            Term::Function(term) => term.coefficient(),
            Term::Constant(term) => term.coefficient,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionTerm> {
        match self {
            Term::Function(term) => Some(term),
            Term::Constant(_) => None,
        }
    }
}

impl From<FunctionTerm> for Term {
    fn from(term: FunctionTerm) -> Self {
        Term::Function(term)
    }
}

impl From<ConstantTerm> for Term {
    fn from(term: ConstantTerm) -> Self {
        Term::Constant(term)
    }
}

/// A recurrence relation `lhs = sum(rhs)`.
///
/// The lhs defines the function signature: unit coefficient, zero shifts,
/// distinct variables. Every rhs function term calls the same function over
/// the same variables in the same order; only the shifts differ.
#[derive(Debug, Clone, PartialEq)]
pub struct Recurrence {
    lhs: FunctionTerm,
    rhs: Vec<Term>,
}

impl Recurrence {
    pub fn new(lhs: FunctionTerm, rhs: Vec<Term>) -> Result<Self, ModelError> {
        if lhs.coefficient != 1.0 {
            return Err(ModelError::LhsCoefficient(lhs.coefficient));
        }
        if lhs.shifts.iter().any(|&s| s != 0.0) {
            return Err(ModelError::LhsShift(lhs.shifts.clone()));
        }
        for (i, var) in lhs.variables.iter().enumerate() {
            if lhs.variables[..i].contains(var) {
                return Err(ModelError::DuplicateVariable(var.clone()));
            }
        }

        for term in rhs.iter().filter_map(Term::as_function) {
            if term.function != lhs.function {
                return Err(ModelError::ForeignFunction {
                    expected: lhs.function.clone(),
                    found: term.function.clone(),
                });
            }
            if term.variables != lhs.variables {
                return Err(ModelError::VariableMismatch {
                    expected: lhs.variables.clone(),
                    found: term.variables.clone(),
                });
            }
        }

        Ok(Self { lhs, rhs })
    }

    pub fn lhs(&self) -> &FunctionTerm {
        &self.lhs
    }

    pub fn rhs(&self) -> &[Term] {
        &self.rhs
    }

    pub fn function(&self) -> &str {
        &self.lhs.function
    }

    pub fn variables(&self) -> &[String] {
        &self.lhs.variables
    }

    /// Iterate over the rhs function terms, skipping constants.
    pub fn function_terms(&self) -> impl Iterator<Item = &FunctionTerm> {
        self.rhs.iter().filter_map(Term::as_function)
    }
}
