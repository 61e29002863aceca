// Numerical limits for the characteristic-root solver

/// Magnitude below which summed coefficients count as cancelled, and the
/// band around `g(1) = 0` that snaps a root to exactly 1
pub const CANCELLATION_EPSILON: f64 = 1e-12;

/// Largest upper bracket ever considered
pub const BRACKET_CAP: f64 = 1e12;

/// Slack applied to the analytic upper bracket to absorb rounding
pub const BRACKET_SLACK: f64 = 1.01;

/// Bracket doublings attempted when the analytic bound is not quite enough
pub const MAX_BRACKET_DOUBLINGS: usize = 40;

/// Power-of-two probes `b = 2^k` tried by the coefficient-aware search
pub const MAX_BRACKET_PROBES: u32 = 50;

/// Newton iterations allowed from a warm start
pub const MAX_NEWTON_ITERATIONS: usize = 20;

/// Relative overshoot above the bracket still accepted from Newton
pub const NEWTON_UPPER_TOLERANCE: f64 = 1.000001;

/// Distance from an integer within which a solved recurrence root is snapped
pub const RECURRENCE_SNAP_TOLERANCE: f64 = 1e-6;

/// Distance from an integer within which a generalized root is snapped
pub const ROOT_SNAP_TOLERANCE: f64 = 1e-9;

/// Float encoding of an infeasible root
pub const INFEASIBLE_SENTINEL: f64 = 1e6;
