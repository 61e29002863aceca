//! Brent's method for bracketed roots
//!
//! Combines inverse quadratic interpolation and the secant method with
//! bisection as the fallback, keeping the root bracketed at every step. Given
//! a sign change on `[a, b]` it always converges; the iteration cap only
//! guards against pathological floating-point behavior.
//!
//! ## References
//!
//! - Brent, R. P. (1973). "Algorithms for Minimization without Derivatives."
//!   Prentice-Hall. Chapter 4.
//! - SciPy brentq: <https://github.com/scipy/scipy/blob/main/scipy/optimize/Zeros/brentq.c>

use crate::solver::errors::RootFindingError;
use crate::solver::trace::{BrentStep, SolveEvent, SolveObserver};

/// Tolerances for [`brent`]
#[derive(Debug, Clone, Copy)]
pub struct BrentOptions {
    /// Absolute x tolerance
    pub xtol: f64,
    /// Relative x tolerance
    pub rtol: f64,
    pub max_iterations: usize,
}

impl Default for BrentOptions {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

/// Find a root of `f` on `[a, b]`, where `f(a)` and `f(b)` differ in sign.
pub fn brent<F, O>(
    mut f: F,
    a: f64,
    b: f64,
    options: &BrentOptions,
    observer: &mut O,
) -> Result<f64, RootFindingError>
where
    F: FnMut(f64) -> f64,
    O: SolveObserver + ?Sized,
{
    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }
    if fpre.is_sign_negative() == fcur.is_sign_negative() {
        return Err(RootFindingError::NoSignChange {
            a,
            b,
            fa: fpre,
            fb: fcur,
        });
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iteration in 1..=options.max_iterations {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            // keep xcur as the best estimate
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (options.xtol + options.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        let mut step = BrentStep::Bisection;
        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
                step = BrentStep::Interpolation;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur);

        observer.observe(SolveEvent::Brent {
            iteration,
            x: xcur,
            g: fcur,
            step,
        });
    }

    Err(RootFindingError::NotConverged {
        iterations: options.max_iterations,
        x: xcur,
    })
}
