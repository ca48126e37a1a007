use crate::theme::Palette;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

/// A one-line legend of `(key, action)` pairs.
pub fn key_hints(hints: &[(&str, &str)], palette: &Palette) -> TextLine<'static> {
    let key_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);

    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled((*key).to_string(), key_style),
                Span::styled(format!(": {action}   "), Style::default().fg(palette.muted)),
            ]
        })
        .collect::<Vec<_>>();

    TextLine::from(spans)
}
