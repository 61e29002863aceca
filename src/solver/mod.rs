//! Characteristic-root solver
//!
//! Finds the dominant root `r >= 1` of `Σ c_j · r^(-d_j) = 1`, which gives the
//! exponential growth rate `O(r^n)` of a linear recurrence.
//!
//! - [`roots`]: the [`solve_recurrence`] and [`find_root`] entry points
//! - [`characteristic`]: log-space evaluation of `g` and `g'`
//! - [`brent`] / [`newton`]: the two root finders
//! - [`cache`]: caller-owned warm-start cache for batch solves
//! - [`trace`]: observers that record a solve step by step

pub mod brent;
pub mod cache;
pub mod characteristic;
pub mod constants;
pub mod errors;
pub mod newton;
pub mod root;
pub mod roots;
pub mod trace;

pub use cache::{RootFinder, SolveStats};
pub use errors::UnsupportedInput;
pub use root::Root;
pub use roots::{find_root, find_root_with, solve_recurrence, solve_recurrence_with};
pub use trace::{SolveEvent, SolveObserver, SolveTrace};
