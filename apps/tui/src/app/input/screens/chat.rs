use crate::app::input::helpers::edit_text;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_chat_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.send_chat(),
        KeyCode::F(2) => {
            app.chat.use_docs = !app.chat.use_docs;
            app.status_message = if app.chat.use_docs {
                "Answers use the legal documents".to_string()
            } else {
                "Answers use general knowledge".to_string()
            };
        }
        KeyCode::F(3) => app.start_voice_input(),
        KeyCode::Esc => {
            if app.chat.input.is_empty() {
                app.switch_tab(AppScreen::Feed);
            } else {
                app.chat.input.clear();
            }
        }
        _ => {
            edit_text(&mut app.chat.input, key);
        }
    }
}
