use crate::app::App;
use crate::gamification::{next_league, LEAGUES};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

pub fn render_leagues(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let Some(standing) = &app.session.profile.standing else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(7)])
        .split(area);

    let progress = standing.progress;
    let label = next_league(progress.xp).map_or_else(
        || format!("{} XP · top tier reached", progress.xp),
        |next| {
            format!(
                "{} XP · {} XP to {}",
                progress.xp,
                progress.remaining(),
                next.name
            )
        },
    );

    f.render_widget(
        Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {} ", standing.league.name))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .gauge_style(Style::default().fg(palette.accent).bg(palette.background))
            .percent(progress.percent())
            .label(label),
        chunks[0],
    );

    let lines = LEAGUES
        .iter()
        .map(|league| {
            let is_current = *league == standing.league;
            let style = if is_current {
                Style::default()
                    .fg(palette.highlight_fg)
                    .bg(palette.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else if progress.xp >= league.min_xp {
                Style::default().fg(palette.success)
            } else {
                Style::default().fg(palette.muted)
            };
            TextLine::from(Span::styled(
                format!(" {:<18} from {:>5} XP ", league.name, league.min_xp),
                style,
            ))
        })
        .chain([
            TextLine::from(""),
            TextLine::from(Span::styled(
                format!("🔥 {} day streak", standing.streak_days),
                Style::default().fg(palette.accent),
            )),
        ])
        .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Leagues ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        ),
        chunks[1],
    );
}
