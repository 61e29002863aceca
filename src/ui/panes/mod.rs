//! TUI pane rendering modules
//!
//! Each pane is a stateless render function over borrowed app state.
//!
//! # Pane Modules
//!
//! - [`recurrence`]: Input text, canonical form, term table and result
//! - [`trace`]: Solver events with the current one highlighted
//! - [`plot`]: `g(x)` over the bracket with the current iterate marked
//! - [`status`]: Status bar with keybindings and playback state

pub mod plot;
pub mod recurrence;
pub mod status;
pub mod trace;

// Re-export render functions for convenience
pub use plot::render_plot_pane;
pub use recurrence::render_recurrence_pane;
pub use status::render_status_bar;
pub use trace::render_trace_pane;
