use crate::app::App;
use crate::ui::screens::feed::reported_at;
use crate::ui::widgets::map_canvas::render_issue_map;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    render_issue_map(app, f, chunks[0]);
    render_marker_details(app, f, chunks[1]);
}

fn render_marker_details(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let block = Block::default()
        .title(" Selected ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let Some(issue) = app.feed.selected_issue() else {
        f.render_widget(
            Paragraph::new("Nothing selected").block(block),
            area,
        );
        return;
    };

    let label = Style::default().fg(palette.muted);
    let lines = vec![
        TextLine::from(Span::styled(
            issue.title.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled("Type: ", label),
            Span::raw(issue.issue_type().label()),
        ]),
        TextLine::from(vec![
            Span::styled("Severity: ", label),
            Span::styled(
                format!("{}/10", issue.severity),
                Style::default().fg(app.theme.severity_color(issue.severity)),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Where: ", label),
            Span::raw(issue.location.address.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Coordinates: ", label),
            Span::raw(format!("{:.4}, {:.4}", issue.location.lat, issue.location.lng)),
        ]),
        TextLine::from(vec![
            Span::styled("Reported: ", label),
            Span::raw(reported_at(issue)),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled("Legend", label)),
        TextLine::from(Span::styled(
            "• Government",
            Style::default().fg(palette.government),
        )),
        TextLine::from(Span::styled(
            "• Volunteer",
            Style::default().fg(palette.volunteer),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
