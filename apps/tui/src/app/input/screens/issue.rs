use crate::app::input::helpers::edit_text;
use crate::app::state::{App, DetailState};
use crossterm::event::KeyCode;

pub fn handle_issue_input(app: &mut App, key: KeyCode) {
    let DetailState::Loaded(view) = &mut app.detail else {
        // Loading, not found and mismatch panels only offer a way back.
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => app.back_to_dashboard(),
            KeyCode::F(5) => app.navigate(app.route.clone()),
            _ => {}
        }
        return;
    };

    if view.composing {
        match key {
            KeyCode::Enter => app.submit_comment(),
            KeyCode::Esc => view.composing = false,
            _ => {
                if !view.posting {
                    edit_text(&mut view.comment_input, key);
                }
            }
        }
        return;
    }

    match key {
        KeyCode::Esc | KeyCode::Backspace => app.back_to_dashboard(),
        KeyCode::Char('c') => app.start_composing(),
        KeyCode::Char('j') => app.join_issue(),
        KeyCode::Char('e') => app.export_notice(),
        KeyCode::Char('d') => app.draft_complaint(),
        KeyCode::Char('p') => {
            let name = view.issue.reported_by.clone();
            app.open_profile(&name);
        }
        KeyCode::F(5) => app.navigate(app.route.clone()),
        _ => {}
    }
}
