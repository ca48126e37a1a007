use crate::app::input::helpers::{edit_text, move_selection};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_feed_input(app: &mut App, key: KeyCode) {
    if app.feed.search_active {
        handle_search_input(app, key);
        return;
    }

    if let Some(selected) = move_selection(app.feed.selected, app.feed.visible.len(), key) {
        app.feed.selected = selected;
        return;
    }

    match key {
        KeyCode::Char('/') => {
            app.feed.search_active = true;
        }
        KeyCode::Char('f') => {
            app.feed.query.type_filter = app.feed.query.type_filter.next();
            app.feed.refresh();
        }
        KeyCode::Char('s') => {
            app.feed.query.sort = app.feed.query.sort.next();
            app.feed.refresh();
        }
        KeyCode::Char('p') => {
            if let Some(name) = app.feed.selected_issue().map(|issue| issue.reported_by.clone()) {
                app.open_profile(&name);
            }
        }
        KeyCode::Esc => {
            if !app.feed.query.text.is_empty() {
                app.feed.query.text.clear();
                app.feed.refresh();
            }
        }
        KeyCode::Enter => app.open_selected_issue(),
        KeyCode::F(5) => app.reload_feed(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => {
            app.feed.search_active = false;
        }
        KeyCode::Esc => {
            app.feed.search_active = false;
            app.feed.query.text.clear();
            app.feed.refresh();
        }
        _ => {
            if edit_text(&mut app.feed.query.text, key) {
                app.feed.selected = 0;
                app.feed.refresh();
            }
        }
    }
}
