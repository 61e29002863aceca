//! Canonical text for a recurrence
//!
//! The output parses back to an equal [`Recurrence`]: `T(n) = 2*T(n-1) - T(n-2) + 5`.

use crate::format::numbers::format_constant;
use crate::parser::ast::{FunctionTerm, Recurrence, Term};

/// Render `rec` as `name(v1, v2) = term + term ...`.
///
/// An empty rhs renders as `= 0`. Terms are joined with `" + "`, and a join
/// followed by a negative term collapses to `" - "`.
pub fn format_recurrence(rec: &Recurrence) -> String {
    let lhs = format!("{}({})", rec.function(), rec.variables().join(", "));
    if rec.rhs().is_empty() {
        return format!("{} = 0", lhs);
    }

    let rhs = rec
        .rhs()
        .iter()
        .map(format_term)
        .collect::<Vec<_>>()
        .join(" + ")
        .replace(" + -", " - ");

    format!("{} = {}", lhs, rhs)
}

/// Render one rhs summand.
pub fn format_term(term: &Term) -> String {
    match term {
        Term::Constant(c) => format_constant(c.coefficient),
        Term::Function(f) => format_function_term(f),
    }
}

fn format_function_term(term: &FunctionTerm) -> String {
    let coefficient = match term.coefficient() {
        c if c == 1.0 => String::new(),
        c if c == -1.0 => "-".to_string(),
        c => format!("{}*", format_constant(c)),
    };

    let args = term
        .variables()
        .iter()
        .zip(term.shifts())
        .map(|(var, &shift)| format_argument(var, shift))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{}{}({})", coefficient, term.function(), args)
}

fn format_argument(var: &str, shift: f64) -> String {
    if shift == 0.0 {
        var.to_string()
    } else if shift < 0.0 {
        format!("{}-{}", var, format_constant(-shift))
    } else {
        format!("{}+{}", var, format_constant(shift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::ConstantTerm;
    use crate::parser::parse_recurrence;

    fn canonical(text: &str) -> String {
        format_recurrence(&parse_recurrence(text).unwrap())
    }

    #[test]
    fn test_formats_simple_recurrences() {
        assert_eq!(canonical("T(n) = T(n-1)"), "T(n) = T(n-1)");
        assert_eq!(canonical("T(n)=T(n-1)+T(n-2)"), "T(n) = T(n-1) + T(n-2)");
        assert_eq!(canonical("T(n) = 2*T(n-1)"), "T(n) = 2*T(n-1)");
        assert_eq!(canonical("T(n) = 5"), "T(n) = 5");
        assert_eq!(canonical("T(n) = T(n+1)"), "T(n) = T(n+1)");
        assert_eq!(canonical("T(n) = 2*T(n)"), "T(n) = 2*T(n)");
    }

    #[test]
    fn test_constant_comes_first() {
        assert_eq!(canonical("T(n) = T(n-1) + 1"), "T(n) = 1 + T(n-1)");
    }

    #[test]
    fn test_negative_terms_use_minus() {
        let lhs = FunctionTerm::signature("T", vec!["n".to_string()]).unwrap();
        let rhs = vec![
            FunctionTerm::new(1.0, "T", vec!["n".to_string()], vec![-1.0])
                .unwrap()
                .into(),
            FunctionTerm::new(-1.0, "T", vec!["n".to_string()], vec![-2.0])
                .unwrap()
                .into(),
            FunctionTerm::new(-2.5, "T", vec!["n".to_string()], vec![-3.0])
                .unwrap()
                .into(),
            ConstantTerm::new(-4.0).into(),
        ];
        let rec = Recurrence::new(lhs, rhs).unwrap();
        assert_eq!(
            format_recurrence(&rec),
            "T(n) = T(n-1) - T(n-2) - 2.5*T(n-3) - 4"
        );
    }

    #[test]
    fn test_empty_rhs() {
        let lhs = FunctionTerm::signature("T", vec!["n".to_string()]).unwrap();
        let rec = Recurrence::new(lhs, Vec::new()).unwrap();
        assert_eq!(format_recurrence(&rec), "T(n) = 0");
    }

    #[test]
    fn test_multi_variable_and_fractional_shifts() {
        assert_eq!(
            canonical("D(m,n) = D(m-1,n) + D(m,n-1) + D(m-1,n-1)"),
            "D(m, n) = D(m-1, n) + D(m, n-1) + D(m-1, n-1)"
        );
        assert_eq!(canonical("T(n) = T(n-1.5)"), "T(n) = T(n-1.5)");
    }

    #[test]
    fn test_unicode_identifiers() {
        assert_eq!(canonical("φ(α) = φ(α-1) + φ(α-2)"), "φ(α) = φ(α-1) + φ(α-2)");
    }
}
