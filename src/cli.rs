//! Command-line front end
//!
//! Reads one recurrence (argument, file or stdin), solves it and prints the
//! growth order as text or JSON. The binary in `main.rs` only wires this to
//! the process streams, the tracing subscriber and the terminal explorer.

use crate::format::{format_asymptotics, format_recurrence};
use crate::parser::{parse_recurrence, ParseError, Recurrence};
use crate::solver::{solve_recurrence_with, Root, SolveObserver, UnsupportedInput};
use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const DIVERGENT_MESSAGE: &str = "Result: Divergent (infinite growth)";
pub const INFEASIBLE_MESSAGE: &str = "Result: No valid root (check for non-positive shifts)";
const INFEASIBLE_ERROR: &str = "No valid root found (non-positive shifts)";

/// Command-line options
#[derive(Debug, Clone, Parser)]
#[command(name = "recurtty", version)]
#[command(about = "Parse and solve recurrence relations to find asymptotic growth rates")]
#[command(after_help = "Examples:\n  \
    recurtty \"T(n) = T(n-1) + T(n-2)\"\n  \
    recurtty input.txt\n  \
    echo \"T(n) = 2*T(n-1)\" | recurtty\n  \
    recurtty --tui \"T(n) = T(n-1) + T(n-3)\"")]
pub struct Cli {
    /// Recurrence text, or a path to a file containing one. Reads stdin when omitted
    pub input: Option<String>,

    /// Show the parsed recurrence and the raw root
    #[arg(short, long)]
    pub verbose: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Step through the solve in the terminal explorer
    #[arg(long, conflicts_with = "json")]
    pub tui: bool,

    /// Log filter for diagnostics on stderr (e.g. `debug`, `recurtty::solver=trace`)
    #[arg(long, env = "RECURTTY_LOG", default_value = "warn")]
    pub log: String,
}

/// Failures that end a run with exit status 1
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not read input: {0}")]
    Io(#[from] io::Error),

    #[error("Empty input")]
    EmptyInput,

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Solver error: {0}")]
    Unsupported(#[from] UnsupportedInput),
}

/// Resolve the input text: an existing file path is read, any other argument
/// is taken literally, and no argument reads `stdin`.
pub fn read_input<R: Read>(input: Option<&str>, mut stdin: R) -> Result<String, CliError> {
    let text = match input {
        Some(arg) if Path::new(arg).is_file() => {
            debug!(path = arg, "reading recurrence from file");
            fs::read_to_string(arg)?
        }
        Some(arg) => arg.to_string(),
        None => {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            text
        }
    };

    if text.trim().is_empty() {
        return Err(CliError::EmptyInput);
    }
    Ok(text)
}

/// A parsed recurrence with its solved root
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub recurrence: Recurrence,
    pub root: Root,
}

impl Analysis {
    /// Parse and solve `text`.
    pub fn run(text: &str) -> Result<Self, CliError> {
        Self::run_with(text, &mut ())
    }

    /// [`Analysis::run`] reporting every solver step to `observer`.
    pub fn run_with<O>(text: &str, observer: &mut O) -> Result<Self, CliError>
    where
        O: SolveObserver + ?Sized,
    {
        let recurrence = parse_recurrence(text)?;
        let root = solve_recurrence_with(&recurrence, observer)?;
        debug!(%root, "analysis complete");
        Ok(Self { recurrence, root })
    }

    fn variable(&self) -> &str {
        self.recurrence
            .variables()
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Human-readable report, one line per entry.
    pub fn render_text(&self, verbose: bool) -> Result<String, CliError> {
        let mut lines = Vec::new();
        if verbose {
            lines.push(format!("Recurrence: {}", format_recurrence(&self.recurrence)));
            lines.push(format!("Function:   {}", self.recurrence.function()));
            lines.push(format!("Variable:   {}", self.variable()));
        }

        match self.root {
            Root::Divergent => lines.push(DIVERGENT_MESSAGE.to_string()),
            Root::Infeasible => lines.push(INFEASIBLE_MESSAGE.to_string()),
            Root::Finite(r) => {
                let big_o = format_asymptotics(&self.recurrence, self.root)?;
                if verbose {
                    lines.push(format!("Root:       {}", r));
                    lines.push(format!("Asymptotics: {}", big_o));
                } else {
                    lines.push(big_o);
                }
            }
        }
        Ok(lines.join("\n"))
    }

    /// JSON report.
    pub fn report(&self, verbose: bool) -> Result<Report, CliError> {
        let mut report = Report::default();
        match self.root {
            Root::Divergent => {
                report.ok = true;
                report.divergent = Some(true);
            }
            Root::Infeasible => {
                report.error = Some(INFEASIBLE_ERROR.to_string());
            }
            Root::Finite(r) => {
                report.ok = true;
                report.divergent = Some(false);
                report.root = Some(BTreeMap::from([(self.variable().to_string(), r)]));
                report.asymptotics = Some(format_asymptotics(&self.recurrence, self.root)?);
            }
        }

        if verbose {
            report.recurrence = Some(format_recurrence(&self.recurrence));
            report.function = Some(self.recurrence.function().to_string());
            report.variables = Some(self.recurrence.variables().to_vec());
        }
        Ok(report)
    }

    /// Solved and divergent results succeed; an infeasible one does not.
    pub fn is_success(&self) -> bool {
        !self.root.is_infeasible()
    }
}

/// JSON output shape
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asymptotics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,
}

impl Report {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Run the non-interactive front end and return the process exit status.
///
/// Results go to `out`. Errors go to `err` in text mode and to `out` as a
/// JSON failure report in JSON mode.
pub fn run<R, W, E>(cli: &Cli, stdin: R, out: &mut W, err: &mut E) -> io::Result<u8>
where
    R: Read,
    W: Write,
    E: Write,
{
    let outcome = read_input(cli.input.as_deref(), stdin)
        .and_then(|text| Analysis::run(&text))
        .and_then(|analysis| {
            let rendered = if cli.json {
                serde_json::to_string_pretty(&analysis.report(cli.verbose)?)
                    .map_err(io::Error::from)?
            } else {
                analysis.render_text(cli.verbose)?
            };
            Ok((rendered, analysis.is_success()))
        });

    match outcome {
        Ok((rendered, success)) => {
            writeln!(out, "{}", rendered)?;
            Ok(if success { 0 } else { 1 })
        }
        Err(e) => {
            debug!(error = %e, "run failed");
            if cli.json {
                let report = serde_json::to_string(&Report::failure(e.to_string()))
                    .map_err(io::Error::from)?;
                writeln!(out, "{}", report)?;
            } else {
                writeln!(err, "Error: {}", e)?;
            }
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("recurtty").chain(args.iter().copied()))
    }

    fn run_with(args: &[&str], stdin: &str) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(&cli(args), stdin.as_bytes(), &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_text_output() {
        let (code, out, err) = run_with(&["T(n) = T(n-1) + T(n-2)"], "");
        assert_eq!(code, 0);
        assert_eq!(out, "O(1.61804^n)\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_reads_stdin() {
        let (code, out, _) = run_with(&[], "T(n) = 2*T(n-1)\n");
        assert_eq!(code, 0);
        assert_eq!(out, "O(2^n)\n");
    }

    #[test]
    fn test_verbose_text() {
        let (code, out, _) = run_with(&["-v", "T(n) = 2*T(n-1)"], "");
        assert_eq!(code, 0);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Recurrence: T(n) = 2*T(n-1)");
        assert_eq!(lines[1], "Function:   T");
        assert_eq!(lines[2], "Variable:   n");
        assert_eq!(lines[3], "Root:       2");
        assert_eq!(lines[4], "Asymptotics: O(2^n)");
    }

    #[test]
    fn test_infeasible_exits_nonzero() {
        let (code, out, _) = run_with(&["T(n) = 0.5*T(n-1)"], "");
        assert_eq!(code, 1);
        assert_eq!(out.trim(), INFEASIBLE_MESSAGE);
    }

    #[test]
    fn test_errors_go_to_stderr() {
        let (code, out, err) = run_with(&["T(n) = = T(n-1)"], "");
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: Parse error at"));

        let (code, _, err) = run_with(&[], "   \n");
        assert_eq!(code, 1);
        assert_eq!(err, "Error: Empty input\n");

        let (code, _, err) = run_with(&["T(m,n) = T(m-1,n)"], "");
        assert_eq!(code, 1);
        assert!(err.contains("only single-variable recurrences are supported"));
    }

    #[test]
    fn test_json_output() {
        let (code, out, _) = run_with(&["--json", "T(n) = 3*T(n-1)"], "");
        assert_eq!(code, 0);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["divergent"], false);
        assert_eq!(value["root"]["n"], 3.0);
        assert_eq!(value["asymptotics"], "O(3^n)");
        assert!(value.get("recurrence").is_none());
    }

    #[test]
    fn test_json_verbose_and_errors() {
        let (_, out, _) = run_with(&["--json", "-v", "F(k) = F(k-1) + F(k-2)"], "");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["recurrence"], "F(k) = F(k-1) + F(k-2)");
        assert_eq!(value["function"], "F");
        assert_eq!(value["variables"][0], "k");

        let (code, out, err) = run_with(&["--json", "garbage"], "");
        assert_eq!(code, 1);
        assert!(err.is_empty());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], false);
        assert!(value["error"].as_str().unwrap().contains("Expected exactly one '='"));
    }

    #[test]
    fn test_json_infeasible() {
        let (code, out, _) = run_with(&["--json", "T(n) = T(n+1) + T(n-1)"], "");
        assert_eq!(code, 1);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], INFEASIBLE_ERROR);
    }

    #[test]
    fn test_tui_conflicts_with_json() {
        let parsed = Cli::try_parse_from(["recurtty", "--tui", "--json", "T(n) = T(n-1)"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_analysis_records_its_own_solve() {
        use crate::solver::SolveTrace;

        let mut trace = SolveTrace::new();
        let analysis = Analysis::run_with("T(n) = 3*T(n-1)", &mut trace).unwrap();
        assert_eq!(analysis.root, Root::Finite(3.0));
        assert_eq!(trace.outcome(), Some(analysis.root));
        assert_eq!(trace.bracket(), Some((1.0, 4.0)));

        assert!(Analysis::run_with("T(n) = ", &mut SolveTrace::new()).is_err());
    }
}
