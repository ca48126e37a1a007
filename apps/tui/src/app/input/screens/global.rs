use crate::app::state::{App, AppScreen};
use crate::route::Route;
use crossterm::event::KeyCode;

/// Keys that work on every screen. Letter shortcuts are skipped while a text
/// field has focus.
pub fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Tab => {
            app.next_tab();
            return true;
        }
        KeyCode::BackTab => {
            app.previous_tab();
            return true;
        }
        _ => {}
    }

    if app.is_typing() {
        return false;
    }

    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('n') => app.navigate(Route::Report),
        KeyCode::Esc
            if matches!(
                app.screen,
                AppScreen::Map | AppScreen::Departments | AppScreen::Leagues
            ) =>
        {
            app.switch_tab(AppScreen::Feed);
        }
        _ => return false,
    }

    true
}
