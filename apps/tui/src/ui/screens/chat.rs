use crate::app::App;
use crate::domain::ChatRole;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_chat(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let width = usize::from(chunks[0].width.saturating_sub(2)).max(1);
    let mut lines = Vec::new();
    let mut rows = 0usize;

    for message in &app.chat.messages {
        let (speaker, color) = match message.role {
            ChatRole::User => ("You", palette.accent),
            ChatRole::Assistant => ("CivicBot", palette.government),
        };
        lines.push(TextLine::from(Span::styled(
            speaker,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(TextLine::from(message.text.clone()));
        lines.push(TextLine::from(""));
        rows += 2 + message.text.chars().count().div_ceil(width).max(1);
    }

    if app.chat.waiting {
        lines.push(TextLine::from(Span::styled(
            "CivicBot is typing...",
            Style::default().fg(palette.muted),
        )));
        rows += 1;
    }

    let visible = usize::from(chunks[0].height.saturating_sub(2));
    let scroll = u16::try_from(rows.saturating_sub(visible)).unwrap_or(u16::MAX);

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title(" CivicBot ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        chunks[0],
    );

    let docs = if app.chat.use_docs {
        " Ask (legal documents on) "
    } else {
        " Ask (legal documents off) "
    };

    f.render_widget(
        Paragraph::new(format!("{}_", app.chat.input)).block(
            Block::default()
                .title(docs)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        ),
        chunks[1],
    );
}
