use crate::app::state::DepartmentsState;
use crate::app::App;
use crate::ui::widgets::charts::render_department_chart;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_departments(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();

    let stats = match &app.departments {
        DepartmentsState::Loaded(stats) => stats,
        DepartmentsState::Idle | DepartmentsState::Loading => {
            render_notice(app, f, area, "Loading department scores...");
            return;
        }
        DepartmentsState::Failed => {
            render_notice(
                app,
                f,
                area,
                "Failed to load data. Press F5 to retry.",
            );
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_department_chart(
        f,
        chunks[0],
        " Top performers ",
        &stats.trending,
        palette.success,
        &palette,
    );
    render_department_chart(
        f,
        chunks[1],
        " Needs attention ",
        &stats.needs_attention,
        palette.danger,
        &palette,
    );
}

fn render_notice(app: &App, f: &mut Frame<'_>, area: Rect, message: &str) {
    let palette = app.theme.palette();
    f.render_widget(
        Paragraph::new(message.to_string())
            .block(
                Block::default()
                    .title(" Department Scores ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border)),
            )
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted)),
        area,
    );
}
