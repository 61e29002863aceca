//! Plot of the characteristic function over the search bracket
//!
//! Draws `g(x)` as a braille line, the `g = 0` axis, and the point evaluated
//! by the current trace event. The window is the accepted bracket, narrowed
//! around the current iterate by the zoom level.

use crate::format::numbers::format_number_with;
use crate::solver::characteristic::Characteristic;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Samples taken across the visible window
const PLOT_SAMPLES: usize = 240;

/// Window shown when the solve never established a bracket
const DEFAULT_WINDOW: (f64, f64) = (1.0, 2.0);

/// Visible x-range for a bracket, zoom level and current iterate.
///
/// The window width is the bracket width divided by `2^zoom`. It is centred
/// on `focus` when there is one and then shifted back inside the bracket.
pub fn plot_window(bracket: (f64, f64), focus: Option<f64>, zoom: u32) -> (f64, f64) {
    let (lower, upper) = bracket;
    let width = (upper - lower) / 2f64.powi(zoom as i32);
    if zoom == 0 || width.is_nan() || width <= 0.0 {
        return bracket;
    }
    let centre = focus
        .filter(|x| x.is_finite())
        .unwrap_or((lower + upper) / 2.0);
    let start = (centre - width / 2.0).clamp(lower, upper - width);
    (start, start + width)
}

/// Sample `g` over `[lo, hi]`, dropping non-finite values.
pub fn sample_curve(g: &Characteristic, (lo, hi): (f64, f64), samples: usize) -> Vec<(f64, f64)> {
    let steps = samples.max(2) - 1;
    (0..=steps)
        .map(|i| lo + (hi - lo) * i as f64 / steps as f64)
        .map(|x| (x, g.value(x)))
        .filter(|(_, y)| y.is_finite())
        .collect()
}

/// y-range covering the sampled curve and the zero line, with a small margin
fn y_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let (min, max) = points
        .iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let margin = ((max - min) * 0.05).max(1e-12);
    (min - margin, max + margin)
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    let mid = (lo + hi) / 2.0;
    [lo, mid, hi]
        .into_iter()
        .map(|v| Span::styled(format_number_with(v, 3), Style::default().fg(DEFAULT_THEME.comment)))
        .collect()
}

/// Render the plot pane
pub fn render_plot_pane(
    frame: &mut Frame,
    area: Rect,
    g: &Characteristic,
    bracket: Option<(f64, f64)>,
    current: Option<(f64, f64)>,
    zoom: u32,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = match current {
        Some((x, y)) => format!(" g(x)   x = {:.10}   g = {:.3e} ", x, y),
        None => " g(x) ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if g.is_empty() {
        let paragraph = Paragraph::new("(no function terms to plot)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let (x_lo, x_hi) = plot_window(
        bracket.unwrap_or(DEFAULT_WINDOW),
        current.map(|(x, _)| x),
        zoom,
    );
    let curve = sample_curve(g, (x_lo, x_hi), PLOT_SAMPLES);
    let (y_lo, y_hi) = y_bounds(&curve);
    let zero = [(x_lo, 0.0), (x_hi, 0.0)];
    let marker: Vec<(f64, f64)> = current
        .filter(|&(x, y)| (x_lo..=x_hi).contains(&x) && y.is_finite())
        .map(|(x, y)| (x, y.clamp(y_lo, y_hi)))
        .into_iter()
        .collect();

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .data(&zero),
        Dataset::default()
            .name("g(x)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(DEFAULT_THEME.primary))
            .data(&curve),
        Dataset::default()
            .name("iterate")
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(DEFAULT_THEME.newton))
            .data(&marker),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("x")
                .style(Style::default().fg(DEFAULT_THEME.comment))
                .bounds([x_lo, x_hi])
                .labels(axis_labels(x_lo, x_hi)),
        )
        .y_axis(
            Axis::default()
                .title("g")
                .style(Style::default().fg(DEFAULT_THEME.comment))
                .bounds([y_lo, y_hi])
                .labels(axis_labels(y_lo, y_hi)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_without_zoom_is_bracket() {
        assert_eq!(plot_window((1.0, 2.0), Some(1.6), 0), (1.0, 2.0));
    }

    #[test]
    fn test_window_zooms_around_focus() {
        let (lo, hi) = plot_window((1.0, 2.0), Some(1.5), 1);
        assert!((lo - 1.25).abs() < 1e-12);
        assert!((hi - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_window_stays_inside_bracket() {
        let (lo, hi) = plot_window((1.0, 2.0), Some(1.95), 2);
        assert!((hi - 2.0).abs() < 1e-12);
        assert!((lo - 1.75).abs() < 1e-12);

        let (lo, _) = plot_window((1.0, 2.0), None, 1);
        assert!((lo - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_sample_curve_covers_window() {
        let g = Characteristic::unit(&[1.0, 2.0]);
        let points = sample_curve(&g, (1.0, 2.0), 11);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], (1.0, 1.0));
        assert!((points[10].1 - (-0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_y_bounds_include_zero() {
        let (lo, hi) = y_bounds(&[(1.0, 0.5), (2.0, 0.25)]);
        assert!(lo < 0.0);
        assert!(hi > 0.5);
    }
}
