//! Solver observation
//!
//! Every solve reports what it does to a [`SolveObserver`]. The plain entry
//! points pass `()`, which discards everything; [`SolveTrace`] keeps the full
//! event list so a caller (the terminal explorer, a test) can replay the
//! search step by step. Observers are always owned by the caller.

use crate::solver::root::Root;
use std::fmt;

/// How a Brent iteration chose its next iterate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrentStep {
    Interpolation,
    Bisection,
}

/// One observable step of a solve
#[derive(Debug, Clone, PartialEq)]
pub enum SolveEvent {
    /// Candidate upper bracket evaluated during bracket search
    Probe { x: f64, g: f64 },
    /// Bracket `[lower, upper]` with a verified sign change
    Bracket { lower: f64, upper: f64 },
    /// Newton iterate from a warm start
    Newton { iteration: usize, x: f64, g: f64 },
    /// Newton result discarded; the bracketed search takes over
    NewtonRejected { reason: &'static str },
    /// Brent iterate
    Brent {
        iteration: usize,
        x: f64,
        g: f64,
        step: BrentStep,
    },
    /// Near-integer root cleaned up
    Snapped { from: f64, to: f64 },
    /// Final outcome
    Finished(Root),
}

impl SolveEvent {
    /// The abscissa this event evaluated, if any.
    pub fn point(&self) -> Option<(f64, f64)> {
        match *self {
            SolveEvent::Probe { x, g }
            | SolveEvent::Newton { x, g, .. }
            | SolveEvent::Brent { x, g, .. } => Some((x, g)),
            _ => None,
        }
    }
}

impl fmt::Display for SolveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveEvent::Probe { x, g } => write!(f, "probe     x = {:<14.8} g = {:.3e}", x, g),
            SolveEvent::Bracket { lower, upper } => {
                write!(f, "bracket   [{}, {}]", lower, upper)
            }
            SolveEvent::Newton { iteration, x, g } => {
                write!(f, "newton #{:<2} x = {:<14.10} g = {:.3e}", iteration, x, g)
            }
            SolveEvent::NewtonRejected { reason } => write!(f, "newton rejected: {}", reason),
            SolveEvent::Brent {
                iteration,
                x,
                g,
                step,
            } => {
                let tag = match step {
                    BrentStep::Interpolation => "interp",
                    BrentStep::Bisection => "bisect",
                };
                write!(
                    f,
                    "brent  #{:<2} x = {:<14.10} g = {:.3e} ({})",
                    iteration, x, g, tag
                )
            }
            SolveEvent::Snapped { from, to } => write!(f, "snap      {} -> {}", from, to),
            SolveEvent::Finished(root) => write!(f, "result    {}", root),
        }
    }
}

/// Receiver for solver events
pub trait SolveObserver {
    fn observe(&mut self, event: SolveEvent);
}

/// Discards all events
impl SolveObserver for () {
    #[inline]
    fn observe(&mut self, _event: SolveEvent) {}
}

/// Recorded sequence of solver events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveTrace {
    events: Vec<SolveEvent>,
}

impl SolveTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SolveEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SolveEvent> {
        self.events.get(index)
    }

    /// The last bracket the solve settled on
    pub fn bracket(&self) -> Option<(f64, f64)> {
        self.events.iter().rev().find_map(|e| match *e {
            SolveEvent::Bracket { lower, upper } => Some((lower, upper)),
            _ => None,
        })
    }

    /// The outcome recorded at the end of the solve
    pub fn outcome(&self) -> Option<Root> {
        self.events.iter().rev().find_map(|e| match *e {
            SolveEvent::Finished(root) => Some(root),
            _ => None,
        })
    }

    /// Number of Newton and Brent iterates
    pub fn iterations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SolveEvent::Newton { .. } | SolveEvent::Brent { .. }))
            .count()
    }
}

impl SolveObserver for SolveTrace {
    fn observe(&mut self, event: SolveEvent) {
        self.events.push(event);
    }
}
