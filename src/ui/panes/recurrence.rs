//! Recurrence pane: input, canonical form, term table and result

use crate::cli::Analysis;
use crate::format::numbers::format_constant;
use crate::format::{format_asymptotics, format_recurrence};
use crate::parser::ast::Term;
use crate::solver::Root;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

fn term_row(term: &Term) -> Line<'static> {
    let number = Style::default().fg(DEFAULT_THEME.number);
    let label = Style::default().fg(DEFAULT_THEME.comment);
    match term {
        Term::Constant(c) => Line::from(vec![
            Span::styled("  const  ", label),
            Span::styled(format_constant(c.coefficient), number),
        ]),
        Term::Function(f) => {
            let shift = f.shifts().first().copied().unwrap_or_default();
            Line::from(vec![
                Span::styled("  c = ", label),
                Span::styled(format!("{:<8}", format_constant(f.coefficient())), number),
                Span::styled(" d = ", label),
                Span::styled(format_constant(-shift + 0.0), number),
            ])
        }
    }
}

/// Build the pane contents
pub fn recurrence_lines(source: &str, analysis: &Analysis) -> Vec<Line<'static>> {
    let rec = &analysis.recurrence;
    let mut lines = vec![heading("Input")];
    lines.extend(source.lines().map(|l| Line::from(format!("  {}", l))));

    lines.push(Line::default());
    lines.push(heading("Canonical"));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(rec.function().to_string(), Style::default().fg(DEFAULT_THEME.function)),
        Span::raw(
            format_recurrence(rec)
                .strip_prefix(rec.function())
                .unwrap_or_default()
                .to_string(),
        ),
    ]));

    lines.push(Line::default());
    lines.push(heading("Terms"));
    if rec.rhs().is_empty() {
        lines.push(Line::styled("  (none)", Style::default().fg(DEFAULT_THEME.comment)));
    }
    lines.extend(rec.rhs().iter().map(term_row));

    lines.push(Line::default());
    lines.push(heading("Result"));
    let (text, color) = match analysis.root {
        Root::Finite(r) => (
            format_asymptotics(rec, analysis.root)
                .map(|big_o| format!("  {}   (r = {})", big_o, r))
                .unwrap_or_else(|e| format!("  {}", e)),
            DEFAULT_THEME.success,
        ),
        Root::Divergent => ("  divergent (infinite growth)".to_string(), DEFAULT_THEME.secondary),
        Root::Infeasible => (
            "  no valid root (check for non-positive shifts)".to_string(),
            DEFAULT_THEME.error,
        ),
    };
    lines.push(Line::styled(text, Style::default().fg(color)));
    lines
}

/// Render the recurrence pane
pub fn render_recurrence_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    analysis: &Analysis,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Recurrence ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let lines = recurrence_lines(source, analysis);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(DEFAULT_THEME.fg))
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
