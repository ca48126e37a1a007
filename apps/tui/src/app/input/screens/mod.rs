use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod chat;
mod feed;
mod global;
mod help;
mod issue;
mod map;
mod report;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if help::handle_alert_dismiss(app, key) {
        return;
    }

    if global::handle_global_keys(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Feed => feed::handle_feed_input(app, key),
        AppScreen::Map => map::handle_map_input(app, key),
        AppScreen::Chat => chat::handle_chat_input(app, key),
        AppScreen::Issue => issue::handle_issue_input(app, key),
        AppScreen::Report => report::handle_report_input(app, key),
        AppScreen::Departments => {
            if key == KeyCode::F(5) {
                app.reload_departments();
            }
        }
        AppScreen::Leagues => {}
        AppScreen::Profile => {
            if key == KeyCode::Esc {
                app.profile = None;
            }
        }
    }
}
