//! Text rendering of recurrences and their growth order
//!
//! - [`recurrence`]: canonical text that parses back to the same model
//! - [`asymptotics`]: `O(base^var)` for a solved root
//! - [`numbers`]: integer snapping and ceiling decimal formatting

pub mod asymptotics;
pub mod numbers;
pub mod recurrence;

pub use asymptotics::format_asymptotics;
pub use numbers::{format_number, snap_to_integer};
pub use recurrence::format_recurrence;
