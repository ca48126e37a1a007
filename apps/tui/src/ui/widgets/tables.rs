use crate::theme::Palette;
use ratatui::style::{Modifier, Style};

/// First row to draw so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

pub fn selected_style(palette: &Palette) -> Style {
    Style::default()
        .bg(palette.highlight_bg)
        .fg(palette.highlight_fg)
        .add_modifier(Modifier::BOLD)
}

pub fn header_style(palette: &Palette) -> Style {
    Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD)
}

/// Shortens `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let kept = text.chars().take(width.saturating_sub(1)).collect::<String>();
    format!("{kept}…")
}
