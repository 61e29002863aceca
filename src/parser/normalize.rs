//! Merging of like terms
//!
//! Function terms are grouped by their shift vector and their coefficients
//! summed; constants collapse into a single constant. Groups whose total falls
//! within [`CANCELLATION_EPSILON`] of zero are dropped, so
//! `T(n-1) + -1*T(n-1)` normalizes to nothing.

use crate::parser::ast::{ConstantTerm, FunctionTerm, Term};
use crate::solver::constants::CANCELLATION_EPSILON;
use rustc_hash::FxHashMap;

/// Hashable form of a shift vector. `-0.0` and `0.0` share a key.
fn shift_key(shifts: &[f64]) -> Vec<u64> {
    shifts.iter().map(|&s| (s + 0.0).to_bits()).collect()
}

/// Combine terms sharing a shift vector.
///
/// Output order: the combined constant (if any), then one function term per
/// distinct shift vector in first-occurrence order.
pub fn normalize(terms: &[Term]) -> Vec<Term> {
    let mut constant = 0.0;
    let mut groups: Vec<(FunctionTerm, f64)> = Vec::new();
    let mut index: FxHashMap<Vec<u64>, usize> = FxHashMap::default();

    for term in terms {
        match term {
            Term::Constant(c) => constant += c.coefficient,
            Term::Function(f) => {
                let key = shift_key(f.shifts());
                match index.get(&key) {
                    Some(&slot) => groups[slot].1 += f.coefficient(),
                    None => {
                        index.insert(key, groups.len());
                        groups.push((f.clone(), f.coefficient()));
                    }
                }
            }
        }
    }

    let mut out = Vec::with_capacity(groups.len() + 1);
    if constant.abs() > CANCELLATION_EPSILON {
        out.push(Term::Constant(ConstantTerm::new(constant)));
    }
    out.extend(
        groups
            .into_iter()
            .filter(|(_, coefficient)| coefficient.abs() > CANCELLATION_EPSILON)
            .map(|(term, coefficient)| Term::Function(term.with_coefficient(coefficient))),
    );
    out
}
