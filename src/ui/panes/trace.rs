//! Solver trace pane with the current event highlighted

use crate::solver::trace::{SolveEvent, SolveTrace};
use crate::solver::Root;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn event_color(event: &SolveEvent) -> Color {
    match event {
        SolveEvent::Probe { .. } => DEFAULT_THEME.comment,
        SolveEvent::Bracket { .. } => DEFAULT_THEME.primary,
        SolveEvent::Newton { .. } => DEFAULT_THEME.newton,
        SolveEvent::NewtonRejected { .. } => DEFAULT_THEME.error,
        SolveEvent::Brent { .. } => DEFAULT_THEME.fg,
        SolveEvent::Snapped { .. } => DEFAULT_THEME.variable,
        SolveEvent::Finished(Root::Finite(_)) => DEFAULT_THEME.success,
        SolveEvent::Finished(_) => DEFAULT_THEME.error,
    }
}

/// Keep `cursor` inside the visible window of `visible_height` rows.
pub fn follow_cursor(scroll_offset: usize, cursor: usize, visible_height: usize) -> usize {
    if cursor < scroll_offset {
        cursor
    } else if cursor >= scroll_offset + visible_height {
        cursor + 1 - visible_height
    } else {
        scroll_offset
    }
}

/// Render the trace pane. With `follow` set the view scrolls to keep the
/// cursor visible; otherwise the manual scroll offset is kept.
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &SolveTrace,
    cursor: usize,
    follow: bool,
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
        .title(format!(" Trace ({} iterations) ", trace.iterations()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if trace.is_empty() {
        let paragraph = Paragraph::new("(no events)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = trace.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);
    if follow {
        *scroll_offset = follow_cursor(*scroll_offset, cursor, visible_height);
    }

    let lines: Vec<Line> = trace
        .events()
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, event)| {
            let is_current = i == cursor;
            let marker = if is_current { "▶ " } else { "  " };
            let mut style = Style::default().fg(event_color(event));
            if is_current {
                style = style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
            } else if i > cursor {
                style = style.fg(DEFAULT_THEME.comment).add_modifier(Modifier::DIM);
            }
            Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.border_focused)),
                Span::styled(format!("{:>3} ", i + 1), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(event.to_string(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_cursor() {
        assert_eq!(follow_cursor(0, 3, 10), 0);
        assert_eq!(follow_cursor(5, 2, 10), 2);
        assert_eq!(follow_cursor(0, 12, 10), 3);
        assert_eq!(follow_cursor(3, 12, 10), 3);
    }
}
