use crate::app::App;
use crate::domain::Issue;
use crate::ui::widgets::tables::{header_style, scroll_offset, selected_style, truncate};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_feed(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_controls(app, f, chunks[0]);
    render_issue_table(app, f, chunks[1]);
}

fn render_controls(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let query = &app.feed.query;
    let label = Style::default().fg(palette.muted);
    let value = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);

    let cursor = if app.feed.search_active { "_" } else { "" };

    let line = TextLine::from(vec![
        Span::styled("Search: ", label),
        Span::styled(format!("{}{cursor}", query.text), value),
        Span::styled("   Type: ", label),
        Span::styled(query.type_filter.label(), value),
        Span::styled("   Sort: ", label),
        Span::styled(query.sort.label(), value),
        Span::styled(
            format!("   {} of {} issues", app.feed.visible.len(), app.feed.issues.len()),
            label,
        ),
    ]);

    let border = if app.feed.search_active {
        palette.accent
    } else {
        palette.border
    };

    f.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        area,
    );
}

fn render_issue_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    if app.feed.visible.is_empty() {
        let message = if app.feed.loading {
            "Loading issues..."
        } else if app.feed.issues.is_empty() {
            "No issues reported yet."
        } else {
            "No issues match the current filters."
        };
        let paragraph = Paragraph::new(message)
            .block(block.title(" Community Feed "))
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted));
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Sev"),
        Cell::from("Type"),
        Cell::from("Title"),
        Cell::from("Category"),
        Cell::from("Status"),
        Cell::from("Reported"),
        Cell::from("Location"),
    ])
    .style(header_style(&palette));

    let total_rows = app.feed.visible.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.feed.selected);

    let rows = app
        .feed
        .visible_issues()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, issue)| {
            let type_color = if issue.is_government() {
                palette.government
            } else {
                palette.volunteer
            };

            let row = Row::new(vec![
                Cell::from(Span::styled(
                    issue.severity.to_string(),
                    Style::default().fg(app.theme.severity_color(issue.severity)),
                )),
                Cell::from(Span::styled(
                    issue.issue_type().label(),
                    Style::default().fg(type_color),
                )),
                Cell::from(truncate(&issue.title, 40)),
                Cell::from(issue.category.clone()),
                Cell::from(issue.status.label()),
                Cell::from(reported_at(issue)),
                Cell::from(truncate(&issue.location.address, 24)),
            ]);

            if index == app.feed.selected {
                row.style(selected_style(&palette))
            } else {
                row.style(Style::default().fg(palette.text))
            }
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(11),
        Constraint::Min(20),
        Constraint::Length(15),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(24),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(format!(
            " Community Feed ({} of {}) ",
            app.feed.selected + 1,
            total_rows
        )))
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn reported_at(issue: &Issue) -> String {
    issue.timestamp.map_or_else(
        || "-".to_string(),
        |timestamp| timestamp.format("%Y-%m-%d %H:%M").to_string(),
    )
}
