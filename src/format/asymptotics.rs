//! Big-O rendering of a solved root

use crate::format::numbers::format_number;
use crate::parser::ast::Recurrence;
use crate::solver::errors::UnsupportedInput;
use crate::solver::root::Root;

pub const DIVERGENT_MARKER: &str = "O(∞)";
pub const CONSTANT_MARKER: &str = "O(1)";
pub const INFEASIBLE_MARKER: &str = "infeasible";

/// Render `root` as the growth order of `rec`, e.g. `O(1.61804^n)`.
///
/// The base is shown with five decimals, rounded up.
pub fn format_asymptotics(rec: &Recurrence, root: Root) -> Result<String, UnsupportedInput> {
    UnsupportedInput::check(rec.variables().len())?;
    let var = &rec.variables()[0];

    Ok(match root {
        Root::Divergent => DIVERGENT_MARKER.to_string(),
        Root::Infeasible => INFEASIBLE_MARKER.to_string(),
        Root::Finite(r) if r.is_infinite() => DIVERGENT_MARKER.to_string(),
        Root::Finite(r) if r == 1.0 => CONSTANT_MARKER.to_string(),
        Root::Finite(r) => format!("O({}^{})", format_number(r), var),
    })
}
