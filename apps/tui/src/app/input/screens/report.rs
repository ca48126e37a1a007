use crate::app::input::helpers::edit_text;
use crate::app::state::{App, ReportStep};
use crate::domain::IssueType;
use crate::route::Route;
use crossterm::event::KeyCode;

pub fn handle_report_input(app: &mut App, key: KeyCode) {
    match app.report.step {
        ReportStep::Describe => match key {
            KeyCode::Enter => app.confirm_description(),
            KeyCode::Esc => app.back_to_dashboard(),
            KeyCode::F(3) => app.start_voice_input(),
            _ => {
                edit_text(&mut app.report.description, key);
            }
        },
        ReportStep::AttachImage => match key {
            KeyCode::Enter => app.analyze_report(),
            KeyCode::Esc => app.report.step = ReportStep::Describe,
            _ => {
                edit_text(&mut app.report.image_path, key);
            }
        },
        ReportStep::Analyzing | ReportStep::Publishing => {
            if key == KeyCode::Esc {
                app.back_to_dashboard();
            }
        }
        ReportStep::Review => match key {
            KeyCode::Enter | KeyCode::Char('p') => app.publish_report(),
            KeyCode::Esc => app.back_to_dashboard(),
            _ => {}
        },
        ReportStep::Published => match key {
            KeyCode::Char('o') => {
                if let Some(route) = published_route(app) {
                    app.navigate(route);
                }
            }
            KeyCode::Enter | KeyCode::Esc => app.back_to_dashboard(),
            _ => {}
        },
    }
}

fn published_route(app: &App) -> Option<Route> {
    let id = app.report.published_id.clone()?;
    let analysis = app.report.analysis.as_ref()?;

    Some(match IssueType::from_category(&analysis.category) {
        IssueType::Government => Route::GovernmentIssue(id),
        IssueType::Volunteer => Route::VolunteerIssue(id),
    })
}
