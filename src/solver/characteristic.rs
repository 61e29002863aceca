//! The characteristic function and its derivative
//!
//! For coefficients `c_j` and deltas `d_j`:
//!
//! ```text
//! g(x)  = Σ c_j · x^(-d_j) − 1
//! g'(x) = −Σ c_j · d_j · x^(-d_j) / x
//! ```
//!
//! Powers are computed as `exp(-d_j · ln x)` so large deltas underflow to zero
//! instead of overflowing. Any non-finite intermediate, or `x <= 0`, makes both
//! outputs `+inf`, which pushes the root finders back toward the valid region.

use crate::parser::ast::Recurrence;

/// Coefficient/delta pairs of one characteristic equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Characteristic {
    coefficients: Vec<f64>,
    deltas: Vec<f64>,
}

impl Characteristic {
    /// Equation from `(coefficient, delta)` pairs.
    pub fn new(terms: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (coefficients, deltas) = terms.into_iter().unzip();
        Self {
            coefficients,
            deltas,
        }
    }

    /// Equation of a single-variable recurrence: one `(c, -shift)` pair per
    /// rhs function term. Constants are ignored.
    pub fn of(rec: &Recurrence) -> Self {
        Self::new(
            rec.function_terms()
                .filter_map(|t| t.shifts().first().map(|&s| (t.coefficient(), -s))),
        )
    }

    /// Equation with every coefficient equal to 1.
    pub fn unit(deltas: &[f64]) -> Self {
        Self {
            coefficients: vec![1.0; deltas.len()],
            deltas: deltas.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn min_delta(&self) -> Option<f64> {
        self.deltas.iter().copied().reduce(f64::min)
    }

    /// `g(1)`, i.e. the coefficient sum minus one.
    pub fn at_one(&self) -> f64 {
        self.coefficients.iter().sum::<f64>() - 1.0
    }

    /// Evaluate `g(x)`.
    pub fn value(&self, x: f64) -> f64 {
        self.evaluate(x).0
    }

    /// Evaluate `(g(x), g'(x))`.
    pub fn evaluate(&self, x: f64) -> (f64, f64) {
        if x <= 0.0 || x.is_nan() {
            return (f64::INFINITY, f64::INFINITY);
        }

        let lx = x.ln();
        let mut sum = 0.0;
        let mut weighted = 0.0;
        for (&c, &d) in self.coefficients.iter().zip(&self.deltas) {
            let term = c * (-d * lx).exp();
            sum += term;
            weighted += d * term;
        }

        let g = sum - 1.0;
        let gp = -weighted / x;
        if !g.is_finite() || !gp.is_finite() {
            return (f64::INFINITY, f64::INFINITY);
        }
        (g, gp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_values() {
        let g = Characteristic::unit(&[1.0, 2.0]);
        assert_eq!(g.at_one(), 1.0);
        let (v, d) = g.evaluate(2.0);
        assert!((v - (-0.25)).abs() < 1e-15);
        // g'(x) = -(1/x^2 + 2/x^3)
        assert!((d - (-0.5)).abs() < 1e-15);
    }

    #[test]
    fn test_coefficients_scale_terms() {
        let g = Characteristic::new([(2.0, 1.0)]);
        assert!(g.value(2.0).abs() < 1e-15);
        assert!((g.at_one() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_domain_is_infinite() {
        let g = Characteristic::unit(&[1.0]);
        assert_eq!(g.evaluate(0.0), (f64::INFINITY, f64::INFINITY));
        assert_eq!(g.evaluate(-3.0), (f64::INFINITY, f64::INFINITY));
        assert_eq!(g.evaluate(f64::NAN), (f64::INFINITY, f64::INFINITY));
    }

    #[test]
    fn test_large_exponents_do_not_overflow() {
        let g = Characteristic::unit(&[1e6, 2e6]);
        assert_eq!(g.value(1e12), -1.0);

        // x < 1 with huge delta overflows; report +inf rather than NaN
        let (v, d) = g.evaluate(0.5);
        assert_eq!(v, f64::INFINITY);
        assert_eq!(d, f64::INFINITY);
    }

    #[test]
    fn test_from_recurrence() {
        let rec = crate::parser::parse_recurrence("T(n) = 3 + 2*T(n-1) + T(n-2.5)").unwrap();
        let g = Characteristic::of(&rec);
        assert_eq!(g.coefficients(), &[2.0, 1.0]);
        assert_eq!(g.deltas(), &[1.0, 2.5]);
    }

    #[test]
    fn test_min_delta() {
        assert_eq!(Characteristic::unit(&[3.0, 0.5, 2.0]).min_delta(), Some(0.5));
        assert_eq!(Characteristic::unit(&[]).min_delta(), None);
    }
}
