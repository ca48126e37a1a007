// UI module for civic_flow
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use crate::ui::widgets::hints::key_hints;
use crate::ui::widgets::popup::{centered_rect, render_popup};
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let palette = app.theme.palette();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        f.area(),
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs and user standing
            Constraint::Min(5),    // Screen
            Constraint::Length(1), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(app, f, layout[0]);

    match app.screen {
        AppScreen::Feed => screens::feed::render_feed(app, f, layout[1]),
        AppScreen::Map => screens::map::render_map(app, f, layout[1]),
        AppScreen::Chat => screens::chat::render_chat(app, f, layout[1]),
        AppScreen::Departments => screens::departments::render_departments(app, f, layout[1]),
        AppScreen::Leagues => screens::leagues::render_leagues(app, f, layout[1]),
        AppScreen::Profile => screens::profile::render_profile(app, f, layout[1]),
        AppScreen::Issue => screens::issue::render_issue(app, f, layout[1]),
        AppScreen::Report => screens::report::render_report(app, f, layout[1]),
    }

    render_status(app, f, layout[2]);
    f.render_widget(
        Paragraph::new(key_hints(&screens::hints(app), &palette)),
        layout[3],
    );

    if app.show_help {
        render_help_popup(app, f);
    } else if let Some(alert) = &app.alert {
        let area = centered_rect(50, 25, f.area());
        let body = Text::from(vec![
            TextLine::from(alert.clone()),
            TextLine::from(""),
            TextLine::from(Span::styled(
                "Press Enter to dismiss",
                Style::default().fg(palette.muted),
            )),
        ]);
        render_popup(f, area, "Notice", body, palette.danger, &palette);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(38)])
        .split(area);

    let titles = AppScreen::TABS
        .iter()
        .map(|screen| TextLine::from(screen.title()))
        .collect::<Vec<_>>();

    let title = match app.screen.tab_index() {
        Some(_) => " Civic Flow ".to_string(),
        None => format!(" Civic Flow · {} ", app.route),
    };

    let tabs = Tabs::new(titles)
        .select(app.screen.tab_index())
        .block(
            Block::default()
                .title(title)
                .title_style(
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        )
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.highlight_fg)
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, chunks[0]);

    let profile = &app.session.profile;
    let standing = profile.standing.as_ref().map_or_else(String::new, |standing| {
        format!(
            " · {} · {} XP",
            standing.league.name.trim_end_matches(" League"),
            standing.progress.xp
        )
    });

    let user = Paragraph::new(TextLine::from(vec![
        Span::styled(
            profile.name.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(standing, Style::default().fg(palette.accent)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );

    f.render_widget(user, chunks[1]);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let mut spans = Vec::new();

    if app.is_loading() {
        spans.push(
            Throbber::default()
                .throbber_style(Style::default().fg(palette.accent))
                .to_symbol_span(&app.throbber),
        );
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        app.status_message.clone(),
        Style::default().fg(palette.text),
    ));

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_help_popup(app: &App, f: &mut Frame<'_>) {
    let palette = app.theme.palette();
    let area = centered_rect(70, 80, f.area());
    let key_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);

    let sections: [(&str, &[(&str, &str)]); 5] = [
        (
            "Everywhere",
            &[
                ("F1", "toggle this help"),
                ("Tab / Shift+Tab", "switch view"),
                ("n", "report a new issue"),
                ("t", "toggle light and dark theme"),
                ("q", "quit"),
            ],
        ),
        (
            "Feed and map",
            &[
                ("↑/↓ PgUp/PgDn Home/End", "move selection"),
                ("/", "search"),
                ("f", "filter by type"),
                ("s", "change sort order"),
                ("p", "reporter profile"),
                ("Enter", "open issue"),
                ("F5", "reload"),
            ],
        ),
        (
            "Issue",
            &[
                ("c", "write a comment (Enter posts)"),
                ("j", "join or volunteer"),
                ("e", "export legal notice"),
                ("d", "draft complaint"),
                ("Esc", "back to the feed"),
            ],
        ),
        (
            "Report",
            &[
                ("Enter", "next step, analyze, publish"),
                ("F3", "voice input"),
                ("o", "open the published issue"),
            ],
        ),
        (
            "Assistant",
            &[("Enter", "send"), ("F2", "use legal documents on/off")],
        ),
    ];

    let mut lines = Vec::new();
    for (title, keys) in sections {
        lines.push(TextLine::from(Span::styled(
            title,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));
        for (key, action) in keys {
            lines.push(TextLine::from(vec![
                Span::styled(format!("  {key:<24}"), key_style),
                Span::raw(*action),
            ]));
        }
        lines.push(TextLine::from(""));
    }

    render_popup(f, area, "Help", Text::from(lines), palette.accent, &palette);
}
