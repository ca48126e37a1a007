pub mod chat;
pub mod departments;
pub mod feed;
pub mod issue;
pub mod leagues;
pub mod map;
pub mod profile;
pub mod report;

use crate::app::state::{App, AppScreen, DetailState, ReportStep};

/// Shortcut legend for the bottom line.
pub fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.screen {
        AppScreen::Feed if app.feed.search_active => {
            vec![("Enter", "Done"), ("Esc", "Clear search")]
        }
        AppScreen::Feed => vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Open"),
            ("/", "Search"),
            ("f", "Filter"),
            ("s", "Sort"),
            ("n", "Report"),
            ("F1", "Help"),
        ],
        AppScreen::Map => vec![("↑/↓", "Select"), ("Enter", "Open"), ("Esc", "Feed")],
        AppScreen::Chat => vec![("Enter", "Send"), ("F2", "Docs"), ("Tab", "Next view")],
        AppScreen::Departments => vec![("F5", "Reload"), ("Tab", "Next view")],
        AppScreen::Leagues => vec![("Tab", "Next view"), ("q", "Quit")],
        AppScreen::Profile => vec![("Esc", "My profile"), ("Tab", "Next view")],
        AppScreen::Issue => match &app.detail {
            DetailState::Loaded(view) if view.composing => {
                vec![("Enter", "Post"), ("Esc", "Cancel")]
            }
            DetailState::Loaded(view) if view.issue.is_government() => vec![
                ("c", "Comment"),
                ("j", "Join case"),
                ("e", "Export notice"),
                ("d", "Draft complaint"),
                ("Esc", "Back"),
            ],
            DetailState::Loaded(_) => vec![
                ("c", "Comment"),
                ("j", "Volunteer"),
                ("p", "Reporter"),
                ("Esc", "Back"),
            ],
            _ => vec![("Enter", "Back to feed")],
        },
        AppScreen::Report => match app.report.step {
            ReportStep::Describe => vec![("Enter", "Next"), ("F3", "Voice"), ("Esc", "Cancel")],
            ReportStep::AttachImage => vec![("Enter", "Analyze"), ("Esc", "Back")],
            ReportStep::Analyzing | ReportStep::Publishing => vec![("Esc", "Cancel")],
            ReportStep::Review => vec![("Enter", "Publish"), ("Esc", "Discard")],
            ReportStep::Published => vec![("o", "Open issue"), ("Enter", "Feed")],
        },
    }
}
