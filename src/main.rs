// recurtty: Recurrence Growth Solver with a Terminal Trace Explorer

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, fmt};

use recurtty::cli::{self, Analysis, Cli};
use recurtty::solver::SolveTrace;
use recurtty::ui::App;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    if args.tui {
        return run_tui(&args);
    }

    let filter = EnvFilter::try_new(&args.log).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let code = cli::run(&args, io::stdin(), &mut io::stdout(), &mut io::stderr())?;
    Ok(ExitCode::from(code))
}

/// Record a traced solve, then hand the terminal to the explorer.
///
/// No tracing subscriber is installed here: log lines on stderr would tear
/// the alternate screen.
fn run_tui(args: &Cli) -> anyhow::Result<ExitCode> {
    let mut trace = SolveTrace::new();
    let prepared = cli::read_input(args.input.as_deref(), io::stdin()).and_then(|text| {
        Analysis::run_with(&text, &mut trace).map(|analysis| (text, analysis))
    });
    let (text, analysis) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(1));
        }
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(text.trim().to_string(), analysis, trace);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal explorer failed")?;
    Ok(ExitCode::SUCCESS)
}
