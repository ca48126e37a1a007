use crate::app::state::App;
use crossterm::event::KeyCode;

#[allow(clippy::missing_const_for_fn)]
pub fn handle_map_input(app: &mut App, key: KeyCode) {
    let total_rows = app.feed.visible.len();

    match key {
        KeyCode::Up | KeyCode::Left => {
            if app.feed.selected > 0 {
                app.feed.selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Right => {
            if total_rows > 0 && app.feed.selected + 1 < total_rows {
                app.feed.selected += 1;
            }
        }
        KeyCode::Enter => app.open_selected_issue(),
        _ => {}
    }
}
