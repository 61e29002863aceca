//! Dominant roots of characteristic equations
//!
//! Two entry points share the same numerical core:
//!
//! - [`solve_recurrence`] works from a parsed [`Recurrence`] and honors its
//!   coefficients. It searches power-of-two upper brackets.
//! - [`find_root`] takes bare deltas with implicit unit coefficients, derives
//!   an analytic upper bracket in log-space, and can start from a warm-start
//!   guess with Newton before falling back to Brent.

use crate::format::numbers::snap_to_integer;
use crate::parser::ast::Recurrence;
use crate::solver::brent::{brent, BrentOptions};
use crate::solver::characteristic::Characteristic;
use crate::solver::constants::*;
use crate::solver::errors::UnsupportedInput;
use crate::solver::newton::{newton, NewtonOptions};
use crate::solver::root::Root;
use crate::solver::trace::{SolveEvent, SolveObserver};
use tracing::{debug, trace};

/// Dominant growth base of a single-variable recurrence.
///
/// Constants on the rhs are ignored: they cannot change the exponential order.
/// A recurrence without function terms grows like `O(1)` and solves to 1.
pub fn solve_recurrence(rec: &Recurrence) -> Result<Root, UnsupportedInput> {
    solve_recurrence_with(rec, &mut ())
}

/// [`solve_recurrence`], reporting each step to `observer`.
pub fn solve_recurrence_with<O>(rec: &Recurrence, observer: &mut O) -> Result<Root, UnsupportedInput>
where
    O: SolveObserver + ?Sized,
{
    UnsupportedInput::check(rec.variables().len())?;

    let g = Characteristic::of(rec);
    let root = solve_characteristic(&g, observer);
    observer.observe(SolveEvent::Finished(root));

    debug!(
        function = rec.function(),
        terms = g.len(),
        root = %root,
        "solved recurrence"
    );
    Ok(root)
}

fn solve_characteristic<O>(g: &Characteristic, observer: &mut O) -> Root
where
    O: SolveObserver + ?Sized,
{
    if g.is_empty() {
        return Root::Finite(1.0);
    }
    if g.deltas().iter().any(|&d| d <= 0.0) {
        debug!(deltas = ?g.deltas(), "non-positive delta, no root >= 1");
        return Root::Infeasible;
    }

    let at_one = g.at_one();
    if at_one.abs() <= CANCELLATION_EPSILON {
        return Root::Finite(1.0);
    }
    if at_one < 0.0 {
        debug!(g1 = at_one, "coefficients too small to sustain growth");
        return Root::Infeasible;
    }

    let Some(upper) = power_of_two_bracket(g, observer) else {
        debug!("no sign change below the bracket cap");
        return Root::Infeasible;
    };
    observer.observe(SolveEvent::Bracket { lower: 1.0, upper });

    match brent(|x| g.value(x), 1.0, upper, &BrentOptions::default(), observer) {
        Ok(x) => Root::Finite(snap(x, RECURRENCE_SNAP_TOLERANCE, observer)),
        Err(e) => {
            debug!(error = %e, "bracketed search failed");
            Root::Infeasible
        }
    }
}

/// Smallest `b = 2^k` with `g(b) <= 0`, staying under [`BRACKET_CAP`].
fn power_of_two_bracket<O>(g: &Characteristic, observer: &mut O) -> Option<f64>
where
    O: SolveObserver + ?Sized,
{
    for k in 1..=MAX_BRACKET_PROBES {
        let b = 2f64.powi(k as i32);
        if b > BRACKET_CAP {
            return None;
        }
        let gb = g.value(b);
        observer.observe(SolveEvent::Probe { x: b, g: gb });
        if gb.is_finite() && gb <= 0.0 {
            return Some(b);
        }
    }
    None
}

/// Unique root `r >= 1` of `Σ r^(-d_j) = 1`.
///
/// - no deltas: [`Root::Divergent`]
/// - one delta: exactly 1, whatever its sign
/// - any non-positive delta among several: [`Root::Infeasible`]
///
/// A finite `warm_start` is tried first with Newton's method; the result only
/// stands if Newton converges inside the bracket, otherwise Brent decides.
pub fn find_root(deltas: &[f64], warm_start: Option<f64>) -> Root {
    find_root_with(deltas, warm_start, &mut ())
}

/// [`find_root`], reporting each step to `observer`.
pub fn find_root_with<O>(deltas: &[f64], warm_start: Option<f64>, observer: &mut O) -> Root
where
    O: SolveObserver + ?Sized,
{
    let root = find_unit_root(deltas, warm_start, observer);
    observer.observe(SolveEvent::Finished(root));
    root
}

fn find_unit_root<O>(deltas: &[f64], warm_start: Option<f64>, observer: &mut O) -> Root
where
    O: SolveObserver + ?Sized,
{
    let g = Characteristic::unit(deltas);
    let min_delta = match (g.len(), g.min_delta()) {
        (0, _) | (_, None) => return Root::Divergent,
        (1, _) => return Root::Finite(1.0),
        (_, Some(d)) if d <= 0.0 => {
            trace!(min_delta = d, "non-positive delta");
            return Root::Infeasible;
        }
        (_, Some(d)) => d,
    };

    let Some(upper) = analytic_bracket(&g, min_delta, observer) else {
        debug!(?deltas, "bracket expansion exhausted");
        return Root::Infeasible;
    };
    observer.observe(SolveEvent::Bracket { lower: 1.0, upper });

    if let Some(x0) = warm_start.filter(|x| x.is_finite()) {
        let start = x0.clamp(1.0, upper);
        match newton(|x| g.evaluate(x), start, &NewtonOptions::default(), observer) {
            Ok(x) if (1.0..=upper * NEWTON_UPPER_TOLERANCE).contains(&x) => {
                trace!(x0, root = x, "warm start accepted");
                return Root::Finite(snap(x, ROOT_SNAP_TOLERANCE, observer));
            }
            Ok(_) => observer.observe(SolveEvent::NewtonRejected {
                reason: "converged outside bracket",
            }),
            Err(e) => {
                trace!(x0, error = %e, "warm start failed");
                observer.observe(SolveEvent::NewtonRejected {
                    reason: "did not converge",
                });
            }
        }
    }

    match brent(|x| g.value(x), 1.0, upper, &BrentOptions::default(), observer) {
        Ok(x) => Root::Finite(snap(x, ROOT_SNAP_TOLERANCE, observer)),
        Err(e) => {
            debug!(error = %e, "bracketed search failed");
            Root::Infeasible
        }
    }
}

/// Upper bracket with `g(b) <= 0`.
///
/// `Σ x^(-d_j) <= m · x^(-min d)`, so `b = m^(1 / min d)` suffices. It is
/// computed in log-space and falls back to the cap when `exp` would overflow.
/// Rounding can still leave `g(b)` slightly positive; the bracket is then
/// doubled a bounded number of times.
fn analytic_bracket<O>(g: &Characteristic, min_delta: f64, observer: &mut O) -> Option<f64>
where
    O: SolveObserver + ?Sized,
{
    let exponent = (g.len() as f64).ln() / min_delta;
    let log_cap = (BRACKET_CAP / BRACKET_SLACK).ln();

    let mut b = if !exponent.is_finite() || exponent >= log_cap {
        BRACKET_CAP
    } else {
        (exponent.exp() * BRACKET_SLACK).max(2.0)
    };

    let gb = g.value(b);
    observer.observe(SolveEvent::Probe { x: b, g: gb });
    if gb.is_finite() && gb <= 0.0 {
        return Some(b);
    }

    for _ in 0..MAX_BRACKET_DOUBLINGS {
        b = (b * 2.0).min(BRACKET_CAP);
        let gb = g.value(b);
        observer.observe(SolveEvent::Probe { x: b, g: gb });
        if gb.is_finite() && gb <= 0.0 {
            return Some(b);
        }
    }
    None
}

fn snap<O>(x: f64, tolerance: f64, observer: &mut O) -> f64
where
    O: SolveObserver + ?Sized,
{
    let snapped = snap_to_integer(x, tolerance);
    if snapped != x {
        observer.observe(SolveEvent::Snapped { from: x, to: snapped });
    }
    snapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_recurrence;
    use crate::solver::trace::SolveTrace;

    const PHI: f64 = 1.618_033_988_749_895;

    fn solve(text: &str) -> Root {
        solve_recurrence(&parse_recurrence(text).unwrap()).unwrap()
    }

    #[test]
    fn test_find_root_closed_forms() {
        let phi = find_root(&[1.0, 2.0], None).value().unwrap();
        assert!((phi - PHI).abs() < 1e-9);

        assert_eq!(find_root(&[1.0, 1.0], None), Root::Finite(2.0));
        assert_eq!(find_root(&[1.0, 1.0, 1.0], None), Root::Finite(3.0));
        assert_eq!(find_root(&[1.0; 5], None), Root::Finite(5.0));

        let tribonacci = find_root(&[1.0, 2.0, 3.0], None).value().unwrap();
        assert!((tribonacci - 1.839_286_755_214_161_2).abs() < 1e-9);
    }

    #[test]
    fn test_find_root_trivial_cases() {
        assert_eq!(find_root(&[], None), Root::Divergent);
        for d in [1.0, 2.0, 0.5, 0.0, -3.0] {
            assert_eq!(find_root(&[d], None), Root::Finite(1.0));
        }
    }

    #[test]
    fn test_find_root_non_positive_deltas() {
        assert_eq!(find_root(&[0.0, 1.0], None), Root::Infeasible);
        assert_eq!(find_root(&[-1.0, 1.0], None), Root::Infeasible);
        assert_eq!(find_root(&[1.0, 0.0], None), Root::Infeasible);
    }

    #[test]
    fn test_find_root_large_and_tiny_deltas() {
        let r = find_root(&[10.0, 20.0], None).value().unwrap();
        assert!(1.0 < r && r < 1.1);

        // b = 2^(1/1e-9) overflows; the cap takes over
        let r = find_root(&[1e-9, 1e-9], None);
        assert!(matches!(r, Root::Finite(_) | Root::Infeasible));
    }

    #[test]
    fn test_warm_start_uses_newton() {
        let mut trace = SolveTrace::new();
        let r = find_root_with(&[1.0, 2.0], Some(1.6), &mut trace).value().unwrap();
        assert!((r - PHI).abs() < 1e-9);
        assert!(trace
            .events()
            .iter()
            .any(|e| matches!(e, SolveEvent::Newton { .. })));
        assert!(!trace
            .events()
            .iter()
            .any(|e| matches!(e, SolveEvent::Brent { .. })));
    }

    #[test]
    fn test_warm_start_paths_agree() {
        let deltas = [1.0, 2.5, 3.25, 4.0];
        let cold = find_root(&deltas, None).value().unwrap();
        for hint in [1.0, 1.3, 2.0, 50.0, 1e12, f64::NAN, f64::INFINITY] {
            let warm = find_root(&deltas, Some(hint)).value().unwrap();
            assert!((warm - cold).abs() < 1e-6, "hint {hint}: {warm} vs {cold}");
        }
    }

    #[test]
    fn test_solve_recurrence_end_to_end() {
        let phi = solve("T(n) = T(n-1) + T(n-2)").value().unwrap();
        assert!((phi - PHI).abs() < 1e-9);

        assert_eq!(solve("T(n) = 2*T(n-1)"), Root::Finite(2.0));
        assert_eq!(solve("T(n) = 3*T(n-1)"), Root::Finite(3.0));
        assert_eq!(solve("T(n) = T(n-1) + T(n-1)"), Root::Finite(2.0));

        let trib = solve("T(n) = T(n-1) + T(n-2) + T(n-3)").value().unwrap();
        assert!((trib - 1.839_286_755_214_161_2).abs() < 1e-6);
    }

    #[test]
    fn test_solve_recurrence_unit_cases() {
        assert_eq!(solve("T(n) = 5"), Root::Finite(1.0));
        assert_eq!(solve("T(n) = T(n-1)"), Root::Finite(1.0));
        assert_eq!(solve("T(n) = T(n-1) + 1"), Root::Finite(1.0));
        assert_eq!(solve("T(n) = T(n-10)"), Root::Finite(1.0));
        assert_eq!(solve("T(n) = T(n-1) + -1*T(n-1)"), Root::Finite(1.0));
        assert_eq!(solve("T(n) = 2*T(n-1) - T(n-2)"), Root::Finite(1.0));
    }

    #[test]
    fn test_solve_recurrence_infeasible() {
        assert_eq!(solve("T(n) = 0.5*T(n-1)"), Root::Infeasible);
        assert_eq!(solve("T(n) = T(n) + T(n-1)"), Root::Infeasible);
        assert_eq!(solve("T(n) = T(n+1) + T(n-1)"), Root::Infeasible);
        // root 2^100 lies past the bracket cap
        assert_eq!(solve("T(n) = 2*T(n-0.01)"), Root::Infeasible);
    }

    #[test]
    fn test_solve_recurrence_rejects_multi_variable() {
        let rec = parse_recurrence("T(m, n) = T(m-1, n) + T(m, n-1)").unwrap();
        assert_eq!(
            solve_recurrence(&rec),
            Err(UnsupportedInput { variables: 2 })
        );
    }

    #[test]
    fn test_solve_recurrence_trace() {
        let rec = parse_recurrence("T(n) = 2*T(n-1)").unwrap();
        let mut trace = SolveTrace::new();
        let root = solve_recurrence_with(&rec, &mut trace).unwrap();

        assert_eq!(trace.bracket(), Some((1.0, 2.0)));
        assert_eq!(trace.outcome(), Some(root));
        assert!(matches!(trace.events()[0], SolveEvent::Probe { x, .. } if x == 2.0));
    }
}
