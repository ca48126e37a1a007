use crate::domain::DepartmentScore;
use crate::theme::Palette;
use crate::ui::widgets::tables::truncate;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

const MAX_SCORE: u64 = 100;
const BAR_WIDTH: u16 = 9;

/// Score bars for one group of departments.
pub fn render_department_chart(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    departments: &[DepartmentScore],
    color: Color,
    palette: &Palette,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    if departments.is_empty() {
        let paragraph = Paragraph::new("No departments")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted));
        f.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar<'_>> = departments
        .iter()
        .map(|department| {
            Bar::default()
                .value(u64::from(department.score))
                .label(TextLine::from(truncate(
                    &department.name,
                    usize::from(BAR_WIDTH),
                )))
                .text_value(format!("{}{}", department.score, trend_arrow(&department.trend)))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(palette.background)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .max(MAX_SCORE)
        .bar_gap(1)
        .bar_width(BAR_WIDTH);

    f.render_widget(chart, area);
}

pub fn trend_arrow(trend: &str) -> &'static str {
    match trend {
        "up" => "↑",
        "down" => "↓",
        _ => "",
    }
}
