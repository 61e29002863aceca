//! Solver outcomes
//!
//! A characteristic equation either has a dominant root `r >= 1`, has no root
//! at or above 1 ([`Root::Infeasible`]), or has no terms at all so growth is
//! unbounded ([`Root::Divergent`]). Infeasible and divergent outcomes are
//! ordinary values: batch callers evaluate many candidates that are infeasible
//! by construction and compare them without error handling.

use crate::solver::constants::INFEASIBLE_SENTINEL;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    /// Dominant root, always `>= 1`
    Finite(f64),
    /// No root at or above 1 exists, or the search budget ran out
    Infeasible,
    /// No function terms; growth is unbounded
    Divergent,
}

impl Root {
    /// The root value, if one was found.
    pub fn value(self) -> Option<f64> {
        match self {
            Root::Finite(r) => Some(r),
            Root::Infeasible | Root::Divergent => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Root::Finite(_))
    }

    pub fn is_infeasible(self) -> bool {
        matches!(self, Root::Infeasible)
    }

    pub fn is_divergent(self) -> bool {
        matches!(self, Root::Divergent)
    }

    /// Float encoding used by consumers that exchange bare numbers:
    /// divergent is `+inf`, infeasible is [`INFEASIBLE_SENTINEL`].
    ///
    /// The encoding orders outcomes the way a minimizing caller wants them:
    /// any real root beats infeasible, which beats divergent.
    pub fn to_sentinel(self) -> f64 {
        match self {
            Root::Finite(r) => r,
            Root::Infeasible => INFEASIBLE_SENTINEL,
            Root::Divergent => f64::INFINITY,
        }
    }

    /// Decode the float encoding. Any finite value at or above the sentinel
    /// reads as infeasible, and NaN is treated the same way.
    pub fn from_sentinel(x: f64) -> Root {
        if x == f64::INFINITY {
            Root::Divergent
        } else if x.is_nan() || x >= INFEASIBLE_SENTINEL {
            Root::Infeasible
        } else {
            Root::Finite(x)
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Root::Finite(r) => write!(f, "{}", r),
            Root::Infeasible => write!(f, "infeasible"),
            Root::Divergent => write!(f, "divergent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_encoding() {
        assert_eq!(Root::Finite(1.5).to_sentinel(), 1.5);
        assert_eq!(Root::Infeasible.to_sentinel(), 1e6);
        assert_eq!(Root::Divergent.to_sentinel(), f64::INFINITY);
    }

    #[test]
    fn test_sentinel_decoding() {
        assert_eq!(Root::from_sentinel(2.0), Root::Finite(2.0));
        assert_eq!(Root::from_sentinel(1e6), Root::Infeasible);
        assert_eq!(Root::from_sentinel(f64::NAN), Root::Infeasible);
        assert_eq!(Root::from_sentinel(f64::INFINITY), Root::Divergent);
    }

    #[test]
    fn test_sentinel_ordering() {
        let mut outcomes = vec![Root::Divergent, Root::Finite(3.0), Root::Infeasible, Root::Finite(1.2)];
        outcomes.sort_by(|a, b| a.to_sentinel().total_cmp(&b.to_sentinel()));
        assert_eq!(
            outcomes,
            vec![Root::Finite(1.2), Root::Finite(3.0), Root::Infeasible, Root::Divergent]
        );
    }
}
