//! Newton-Raphson iteration for warm starts

use crate::solver::constants::MAX_NEWTON_ITERATIONS;
use crate::solver::errors::RootFindingError;
use crate::solver::trace::{SolveEvent, SolveObserver};

/// Newton configuration
#[derive(Debug, Clone, Copy)]
pub struct NewtonOptions {
    /// Converged once successive iterates differ by less than this
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            tolerance: 1.48e-8,
            max_iterations: MAX_NEWTON_ITERATIONS,
        }
    }
}

/// Run Newton's method on `f`, which returns `(f(x), f'(x))`, from `x0`.
pub fn newton<F, O>(
    mut f: F,
    x0: f64,
    options: &NewtonOptions,
    observer: &mut O,
) -> Result<f64, RootFindingError>
where
    F: FnMut(f64) -> (f64, f64),
    O: SolveObserver + ?Sized,
{
    let mut x = x0;

    for iteration in 1..=options.max_iterations {
        let (fx, dfx) = f(x);
        observer.observe(SolveEvent::Newton { iteration, x, g: fx });

        if fx == 0.0 {
            return Ok(x);
        }
        if dfx == 0.0 {
            return Err(RootFindingError::ZeroDerivative { x });
        }

        let next = x - fx / dfx;
        if !next.is_finite() {
            return Err(RootFindingError::NonFiniteStep { x });
        }
        if (next - x).abs() < options.tolerance {
            return Ok(next);
        }
        x = next;
    }

    Err(RootFindingError::NotConverged {
        iterations: options.max_iterations,
        x,
    })
}
