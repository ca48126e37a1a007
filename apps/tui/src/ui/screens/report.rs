use crate::app::state::{ReportState, ReportStep};
use crate::app::App;
use crate::theme::Palette;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const STEPS: [&str; 4] = ["1 Describe", "2 Photo", "3 Review", "4 Published"];

pub fn render_report(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let report = &app.report;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    f.render_widget(Paragraph::new(step_line(report.step, &palette)), chunks[0]);

    render_input(
        f,
        chunks[1],
        " What's wrong? ",
        &report.description,
        report.step == ReportStep::Describe,
        &palette,
    );
    render_input(
        f,
        chunks[2],
        " Photo path (optional) ",
        &report.image_path,
        report.step == ReportStep::AttachImage,
        &palette,
    );

    render_outcome(app, f, chunks[3]);
}

fn step_line(current: ReportStep, palette: &Palette) -> TextLine<'static> {
    let current_index = match current {
        ReportStep::Describe => 0,
        ReportStep::AttachImage | ReportStep::Analyzing => 1,
        ReportStep::Review | ReportStep::Publishing => 2,
        ReportStep::Published => 3,
    };

    let spans = STEPS
        .iter()
        .enumerate()
        .flat_map(|(index, name)| {
            let style = if index == current_index {
                Style::default()
                    .fg(palette.highlight_fg)
                    .bg(palette.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else if index < current_index {
                Style::default().fg(palette.success)
            } else {
                Style::default().fg(palette.muted)
            };
            [Span::styled(format!(" {name} "), style), Span::raw("  ")]
        })
        .collect::<Vec<_>>();

    TextLine::from(spans)
}

fn render_input(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    value: &str,
    focused: bool,
    palette: &Palette,
) {
    let (text, border) = if focused {
        (format!("{value}_"), palette.accent)
    } else {
        (value.to_string(), palette.border)
    };

    f.render_widget(
        Paragraph::new(text)
            .block(
                Block::default()
                    .title(title.to_string())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_outcome(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let report = &app.report;
    let mut lines = outcome_lines(app, report, &palette);

    if let Some(error) = &report.error {
        lines.insert(
            0,
            TextLine::from(Span::styled(
                error.clone(),
                Style::default()
                    .fg(palette.danger)
                    .add_modifier(Modifier::BOLD),
            )),
        );
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(" AI Analysis ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn outcome_lines(app: &App, report: &ReportState, palette: &Palette) -> Vec<TextLine<'static>> {
    let label = Style::default().fg(palette.muted);

    match report.step {
        ReportStep::Describe | ReportStep::AttachImage => vec![TextLine::from(Span::styled(
            "Describe the problem, optionally attach a photo, then press Enter to analyze.",
            label,
        ))],
        ReportStep::Analyzing => vec![TextLine::from("Analyzing your report...")],
        ReportStep::Publishing => vec![TextLine::from("Publishing...")],
        ReportStep::Published => vec![
            TextLine::from(Span::styled(
                format!(
                    "Issue published{}",
                    report
                        .published_id
                        .as_ref()
                        .map_or_else(String::new, |id| format!(" as #{id}"))
                ),
                Style::default()
                    .fg(palette.success)
                    .add_modifier(Modifier::BOLD),
            )),
            TextLine::from("It is now visible in the community feed."),
        ],
        ReportStep::Review => {
            let Some(analysis) = &report.analysis else {
                return Vec::new();
            };

            let mut lines = vec![
                TextLine::from(Span::styled(
                    analysis.title.clone(),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                TextLine::from(vec![
                    Span::styled("Category: ", label),
                    Span::raw(analysis.category.clone()),
                ]),
                TextLine::from(vec![
                    Span::styled("Severity: ", label),
                    Span::styled(
                        format!("{}/10", analysis.severity),
                        Style::default().fg(app.theme.severity_color(analysis.severity)),
                    ),
                ]),
            ];

            if let Some(department) = &analysis.department {
                lines.push(TextLine::from(vec![
                    Span::styled("Department: ", label),
                    Span::raw(department.clone()),
                ]));
            }
            if let Some(reference) = &analysis.legal_reference {
                lines.push(TextLine::from(vec![
                    Span::styled("Legal reference: ", label),
                    Span::raw(reference.clone()),
                ]));
            }
            if let Some(matched) = analysis.matched_volunteers {
                lines.push(TextLine::from(vec![
                    Span::styled("Matched volunteers: ", label),
                    Span::raw(matched.to_string()),
                ]));
            }

            lines.push(TextLine::from(""));
            lines.push(TextLine::from(analysis.ai_analysis.clone()));
            lines
        }
    }
}
