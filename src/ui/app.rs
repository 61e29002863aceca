//! Main TUI application state and logic

use crate::cli::Analysis;
use crate::solver::characteristic::Characteristic;
use crate::solver::trace::{SolveEvent, SolveTrace};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between events in play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(400);

/// Deepest plot zoom, as a power of two
pub const MAX_PLOT_ZOOM: u32 = 40;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Recurrence,
    Trace,
    Plot,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: recurrence -> trace -> plot)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Recurrence => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::Plot,
            FocusedPane::Plot => FocusedPane::Recurrence,
        }
    }
}

/// Position within a recorded trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceCursor {
    position: usize,
    len: usize,
}

impl TraceCursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn at_start(&self) -> bool {
        self.position == 0
    }

    pub fn at_end(&self) -> bool {
        self.position + 1 >= self.len
    }

    /// Returns false when already at the last event.
    pub fn step_forward(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Returns false when already at the first event.
    pub fn step_backward(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn jump_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.len.saturating_sub(1);
    }
}

/// The main application state
pub struct App {
    /// The recurrence text as entered
    pub source_text: String,

    /// Parsed recurrence and its root
    pub analysis: Analysis,

    /// Characteristic equation plotted in the plot pane
    pub characteristic: Characteristic,

    /// Recorded solver events
    pub trace: SolveTrace,

    /// Currently displayed event
    pub cursor: TraceCursor,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub recurrence_scroll: usize,
    pub trace_scroll: usize,

    /// Scroll the trace pane along with the cursor; cleared by manual scrolling
    pub trace_follow: bool,

    /// Plot window is the bracket divided by 2^zoom, centred on the iterate
    pub plot_zoom: u32,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over a recorded solve of `analysis`
    pub fn new(source_text: String, analysis: Analysis, trace: SolveTrace) -> Self {
        let characteristic = Characteristic::of(&analysis.recurrence);
        let now = Instant::now();
        App {
            source_text,
            analysis,
            characteristic,
            cursor: TraceCursor::new(trace.len()),
            trace,
            focused_pane: FocusedPane::Trace,
            recurrence_scroll: 0,
            trace_scroll: 0,
            trace_follow: true,
            plot_zoom: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// The event under the cursor
    pub fn current_event(&self) -> Option<&SolveEvent> {
        self.trace.get(self.cursor.position())
    }

    /// The most recent evaluated point at or before the cursor
    pub fn current_point(&self) -> Option<(f64, f64)> {
        self.trace.events()[..self.trace.len().min(self.cursor.position() + 1)]
            .iter()
            .rev()
            .find_map(SolveEvent::point)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.cursor.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        // Left column: Recurrence (top) | Trace (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[0]);

        super::panes::render_recurrence_pane(
            frame,
            left_rows[0],
            &self.source_text,
            &self.analysis,
            self.focused_pane == FocusedPane::Recurrence,
            &mut self.recurrence_scroll,
        );

        super::panes::render_trace_pane(
            frame,
            left_rows[1],
            &self.trace,
            self.cursor.position(),
            self.trace_follow,
            self.focused_pane == FocusedPane::Trace,
            &mut self.trace_scroll,
        );

        super::panes::render_plot_pane(
            frame,
            columns[1],
            &self.characteristic,
            self.trace.bracket(),
            self.current_point(),
            self.plot_zoom,
            self.focused_pane == FocusedPane::Plot,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            &self.cursor,
            self.is_playing,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Left | KeyCode::Right | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char(' ')
        ) {
            self.trace_follow = true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.cursor.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: at first event".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.cursor.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: at last event".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Recurrence => {
                    self.recurrence_scroll = self.recurrence_scroll.saturating_sub(1);
                }
                FocusedPane::Trace => {
                    self.trace_follow = false;
                    self.trace_scroll = self.trace_scroll.saturating_sub(1);
                }
                FocusedPane::Plot => {
                    self.plot_zoom = (self.plot_zoom + 1).min(MAX_PLOT_ZOOM);
                    self.status_message = format!("Zoom x{}", 1u64 << self.plot_zoom);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Recurrence => {
                    self.recurrence_scroll = self.recurrence_scroll.saturating_add(1);
                }
                FocusedPane::Trace => {
                    self.trace_follow = false;
                    self.trace_scroll = self.trace_scroll.saturating_add(1);
                }
                FocusedPane::Plot => {
                    self.plot_zoom = self.plot_zoom.saturating_sub(1);
                    self.status_message = format!("Zoom x{}", 1u64 << self.plot_zoom);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now();
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.cursor.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.cursor.jump_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }
}
