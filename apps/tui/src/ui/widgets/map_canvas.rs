use crate::app::App;
use crate::domain::Issue;
use crate::map::{project_issues, MarkerPosition};
use crate::ui::widgets::tables::truncate;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const CANVAS_SPAN: f64 = 100.0;
const LABEL_MAX_CHARS: usize = 24;
const LABEL_GAP: f64 = 2.0;
const LABEL_RISE: f64 = 4.0;

/// Canvas coordinates for a marker. The canvas y axis grows upwards.
pub fn canvas_point(position: MarkerPosition) -> (f64, f64) {
    (position.left, CANVAS_SPAN - position.top)
}

/// Where to print a label of `label_chars` cells next to the marker at
/// `(x, y)` so it stays inside a canvas of `width` x `height` cells.
pub fn label_anchor(x: f64, y: f64, label_chars: usize, width: u16, height: u16) -> (f64, f64) {
    let cell_width = CANVAS_SPAN / f64::from(width.max(1));
    let cell_height = CANVAS_SPAN / f64::from(height.max(1));

    #[allow(clippy::cast_precision_loss)]
    let label_span = label_chars as f64 * cell_width;
    let max_x = (CANVAS_SPAN - label_span).max(0.0);
    let max_y = (CANVAS_SPAN - cell_height).max(0.0);

    ((x + LABEL_GAP).min(max_x), (y + LABEL_RISE).min(max_y))
}

/// Plots the visible feed issues, highlighting the selected one.
pub fn render_issue_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let block = Block::default()
        .title(" Issue Map ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let issues: Vec<&Issue> = app.feed.visible_issues().collect();
    if issues.is_empty() {
        let paragraph = Paragraph::new("No issues to show")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted));
        f.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    let markers = project_issues(&issues);
    let selected_id = app.feed.selected_issue().map(|issue| issue.id.clone());

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, CANVAS_SPAN])
        .y_bounds([0.0, CANVAS_SPAN])
        .paint(|ctx| {
            for step in 1..4 {
                let offset = f64::from(step) * 25.0;
                ctx.draw(&CanvasLine {
                    x1: offset,
                    y1: 0.0,
                    x2: offset,
                    y2: CANVAS_SPAN,
                    color: palette.muted,
                });
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: offset,
                    x2: CANVAS_SPAN,
                    y2: offset,
                    color: palette.muted,
                });
            }

            ctx.layer();

            for (issue, position) in &markers {
                let (x, y) = canvas_point(*position);
                let color = if issue.is_government() {
                    palette.government
                } else {
                    palette.volunteer
                };
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: 0.8,
                    color,
                });
            }

            if let Some((issue, position)) = markers
                .iter()
                .find(|(issue, _)| Some(&issue.id) == selected_id.as_ref())
            {
                let (x, y) = canvas_point(*position);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: 3.0,
                    color: palette.accent,
                });
                let label = truncate(&issue.title, LABEL_MAX_CHARS);
                let (label_x, label_y) =
                    label_anchor(x, y, label.chars().count(), inner.width, inner.height);
                ctx.print(
                    label_x,
                    label_y,
                    TextLine::styled(
                        label,
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_viewport_is_top_of_canvas() {
        let (x, y) = canvas_point(MarkerPosition {
            left: 10.0,
            top: 10.0,
        });
        assert!((x - 10.0).abs() < f64::EPSILON);
        assert!((y - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn label_sits_beside_marker_when_it_fits() {
        let (x, y) = label_anchor(10.0, 50.0, 24, 100, 20);
        assert!((x - 12.0).abs() < 1e-9);
        assert!((y - 54.0).abs() < 1e-9);
    }

    #[test]
    fn long_label_near_right_edge_stays_inside_narrow_map() {
        let (x, _) = label_anchor(90.0, 50.0, 24, 30, 20);
        // 24 of 30 cells leaves 20% of the canvas before the label.
        assert!((x - 20.0).abs() < 1e-9);
        assert!(x + 24.0 * (100.0 / 30.0) <= 100.0 + 1e-9);
    }

    #[test]
    fn label_near_top_stays_below_the_border() {
        let (_, y) = label_anchor(10.0, 99.0, 5, 100, 20);
        assert!((y - 95.0).abs() < 1e-9);
    }
}
