use crate::app::state::{DetailState, IssueView};
use crate::app::App;
use crate::domain::Issue;
use crate::theme::Palette;
use crate::ui::screens::feed::reported_at;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_issue(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();

    match &app.detail {
        DetailState::Idle => {}
        DetailState::Loading(route) => {
            render_message(
                f,
                area,
                &palette,
                " Issue ",
                vec![TextLine::from(format!(
                    "Loading issue {}...",
                    route.issue_id().unwrap_or_default()
                ))],
            );
        }
        DetailState::NotFound => {
            render_message(
                f,
                area,
                &palette,
                " Issue ",
                vec![
                    TextLine::from(Span::styled(
                        "Issue not found.",
                        Style::default()
                            .fg(palette.danger)
                            .add_modifier(Modifier::BOLD),
                    )),
                    TextLine::from(""),
                    TextLine::from("Press Enter to return to the dashboard."),
                ],
            );
        }
        DetailState::Mismatch(mismatch) => {
            render_message(
                f,
                area,
                &palette,
                " Wrong issue type ",
                vec![
                    TextLine::from(Span::styled(
                        mismatch.to_string(),
                        Style::default()
                            .fg(palette.danger)
                            .add_modifier(Modifier::BOLD),
                    )),
                    TextLine::from(""),
                    TextLine::from("Press Enter to return to the dashboard."),
                ],
            );
        }
        DetailState::Loaded(view) => render_loaded(app, f, area, view),
    }
}

fn render_message(
    f: &mut Frame<'_>,
    area: Rect,
    palette: &Palette,
    title: &str,
    lines: Vec<TextLine<'static>>,
) {
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_loaded(app: &App, f: &mut Frame<'_>, area: Rect, view: &IssueView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    render_details(app, f, chunks[0], view);
    render_thread(app, f, chunks[1], view);
}

fn render_details(app: &App, f: &mut Frame<'_>, area: Rect, view: &IssueView) {
    let palette = app.theme.palette();
    let issue = &view.issue;
    let label = Style::default().fg(palette.muted);
    let type_color = if issue.is_government() {
        palette.government
    } else {
        palette.volunteer
    };

    let mut lines = vec![
        TextLine::from(Span::styled(
            issue.title.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(vec![
            Span::styled(
                format!("[{}] ", issue.issue_type().label()),
                Style::default().fg(type_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} · {}", issue.category, issue.status.label())),
        ]),
        TextLine::from(vec![
            Span::styled("Severity: ", label),
            Span::styled(
                format!("{}/10", issue.severity),
                Style::default().fg(app.theme.severity_color(issue.severity)),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Location: ", label),
            Span::raw(issue.location.address.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Reported by: ", label),
            Span::raw(format!("{} on {}", issue.reported_by, reported_at(issue))),
        ]),
    ];

    if !issue.department.is_empty() {
        lines.push(TextLine::from(vec![
            Span::styled("Department: ", label),
            Span::raw(issue.department.clone()),
        ]));
    }

    lines.extend(participation_lines(issue, view.joined, &palette));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(issue.description.clone()));

    if !issue.ai_analysis.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled("AI analysis", label)));
        lines.push(TextLine::from(issue.ai_analysis.clone()));
    }

    if !issue.tags.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            issue
                .tags
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" "),
            Style::default().fg(palette.accent),
        )));
    }

    lines.extend(trust_lines(issue, &palette));

    if let Some(notice) = &view.notice {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            format!("Legal notice ({})", notice.filename),
            label,
        )));
        lines.push(TextLine::from(notice.preview_text.clone()));
    } else if view.notice_pending {
        lines.push(TextLine::from(Span::styled("Generating legal notice...", label)));
    }

    if let Some(complaint) = &view.complaint {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled("Complaint draft", label)));
        lines.extend(complaint.lines().map(|line| TextLine::from(line.to_string())));
    } else if view.complaint_pending {
        lines.push(TextLine::from(Span::styled("Drafting complaint...", label)));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(format!(" Issue #{} ", issue.id))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(type_color)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

/// Counters exactly as the backend reported them; absent ones are omitted.
fn participation_lines(issue: &Issue, joined: bool, palette: &Palette) -> Vec<TextLine<'static>> {
    let label = Style::default().fg(palette.muted);
    let mut lines = Vec::new();

    if issue.is_government() {
        if let Some(supporters) = issue.supporters_joined {
            lines.push(TextLine::from(vec![
                Span::styled("Supporters: ", label),
                Span::raw(supporters.to_string()),
            ]));
        }
    } else {
        let volunteers = match (issue.volunteers_joined, issue.volunteers_needed) {
            (Some(joined), Some(needed)) => Some(format!("{joined} of {needed} joined")),
            (Some(joined), None) => Some(format!("{joined} joined")),
            (None, Some(needed)) => Some(format!("{needed} needed")),
            (None, None) => None,
        };
        if let Some(volunteers) = volunteers {
            lines.push(TextLine::from(vec![
                Span::styled("Volunteers: ", label),
                Span::raw(volunteers),
            ]));
        }
    }

    if joined {
        let text = if issue.is_government() {
            "✔ You joined this case"
        } else {
            "✔ You volunteered"
        };
        lines.push(TextLine::from(Span::styled(
            text,
            Style::default().fg(palette.success),
        )));
    }

    lines
}

fn trust_lines(issue: &Issue, palette: &Palette) -> Vec<TextLine<'static>> {
    let trust = &issue.trust;
    if trust.is_empty() {
        return Vec::new();
    }

    let label = Style::default().fg(palette.muted);
    let mut lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled("Trust indicators", label)),
    ];

    let percentages = [
        ("AI confidence", trust.ai_confidence),
        ("Fairness", trust.fairness_score),
        ("Disagreement", trust.disagreement_rate),
    ];
    for (name, value) in percentages {
        if let Some(value) = value {
            lines.push(TextLine::from(vec![
                Span::styled(format!("  {name}: "), label),
                Span::raw(format_ratio(value)),
            ]));
        }
    }

    if let Some(relief) = &trust.financial_relief {
        lines.push(TextLine::from(vec![
            Span::styled("  Financial relief: ", label),
            Span::raw(relief.clone()),
        ]));
    }

    if let Some(trace) = &trust.opik_trace_id {
        lines.push(TextLine::from(vec![
            Span::styled("  Trace: ", label),
            Span::raw(trace.clone()),
        ]));
    }

    lines
}

/// Backend ratios arrive either as `0..=1` or already as percentages.
fn format_ratio(value: f64) -> String {
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    format!("{percent:.0}%")
}

fn render_thread(app: &App, f: &mut Frame<'_>, area: Rect, view: &IssueView) {
    let palette = app.theme.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let mut lines = Vec::new();
    if view.comments.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "No comments yet. Press c to start the discussion.",
            Style::default().fg(palette.muted),
        )));
    }

    for comment in &view.comments {
        lines.push(TextLine::from(vec![
            Span::styled(
                comment.user_name.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                comment
                    .timestamp
                    .as_ref()
                    .map_or_else(String::new, |timestamp| format!("  {timestamp}")),
                Style::default().fg(palette.muted),
            ),
        ]));
        lines.push(TextLine::from(comment.text.clone()));
        lines.push(TextLine::from(""));
    }

    // Newest comments sit at the bottom; keep them in view.
    let visible = usize::from(chunks[0].height.saturating_sub(2));
    let scroll = u16::try_from(lines.len().saturating_sub(visible)).unwrap_or(u16::MAX);

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(format!(" Discussion ({}) ", view.comments.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        chunks[0],
    );

    let (input, border) = if view.posting {
        ("Posting...".to_string(), palette.muted)
    } else if view.composing {
        (format!("{}_", view.comment_input), palette.accent)
    } else {
        ("Press c to comment".to_string(), palette.border)
    };

    f.render_widget(
        Paragraph::new(input).block(
            Block::default()
                .title(" Comment ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::fixtures::issue;
    use crate::theme::ThemeProvider;

    #[test]
    fn absent_counters_are_not_shown() {
        let palette = ThemeProvider::default().palette();
        let issue = issue("4", "Blood donors", "Medical", 9, None);

        assert!(participation_lines(&issue, false, &palette).is_empty());
    }

    #[test]
    fn partial_volunteer_counts() {
        let palette = ThemeProvider::default().palette();
        let mut issue = issue("4", "Blood donors", "Medical", 9, None);
        issue.volunteers_needed = Some(5);

        let lines = participation_lines(&issue, true, &palette);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "Volunteers: 5 needed");
    }

    #[test]
    fn ratios_render_as_percentages() {
        assert_eq!(format_ratio(0.92), "92%");
        assert_eq!(format_ratio(87.0), "87%");
    }
}
