//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI replays a recorded [`SolveTrace`] one event at a time:
//!
//! - **[`app`]**: application state, trace cursor, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (recurrence,
//!   trace, plot, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an [`Analysis`]
//! and its trace, then call [`App::run`] to start the event loop.
//!
//! [`SolveTrace`]: crate::solver::SolveTrace
//! [`Analysis`]: crate::cli::Analysis
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
