use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_profile(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let profile = app.displayed_profile();
    let label = Style::default().fg(palette.muted);

    let mut lines = vec![
        TextLine::from(Span::styled(
            profile.name.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(profile.role.clone(), label)),
        TextLine::from(""),
        TextLine::from(vec![Span::styled("Email: ", label), Span::raw(profile.email.clone())]),
        TextLine::from(vec![
            Span::styled("Member since: ", label),
            Span::raw(profile.joined.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Impact: ", label),
            Span::raw(profile.impact.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Avatar: ", label),
            Span::raw(profile.avatar.clone()),
        ]),
    ];

    if let Some(standing) = &profile.standing {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(vec![
            Span::styled("League: ", label),
            Span::raw(format!(
                "{} ({} XP)",
                standing.league.name, standing.progress.xp
            )),
        ]));
        lines.push(TextLine::from(vec![
            Span::styled("Streak: ", label),
            Span::raw(format!("{} days", standing.streak_days)),
        ]));
    }

    let title = if profile.standing.is_some() {
        " My Profile "
    } else {
        " Reporter Profile "
    };

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}
