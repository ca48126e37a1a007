use crossterm::event::KeyCode;

const PAGE_STEP: usize = 5;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Applies a text-editing key to `target`. Returns false for keys that do
/// not edit text.
pub fn edit_text(target: &mut String, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(ch) => {
            target.push(ch);
            true
        }
        KeyCode::Backspace => {
            target.pop();
            true
        }
        _ => false,
    }
}

/// Moves a list selection for the usual navigation keys. Returns `None` when
/// `key` is not a navigation key.
pub const fn move_selection(selected: usize, total_rows: usize, key: KeyCode) -> Option<usize> {
    if total_rows == 0 {
        return match key {
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home
            | KeyCode::End => Some(0),
            _ => None,
        };
    }

    let last = total_rows - 1;
    match key {
        KeyCode::Up => Some(selected.saturating_sub(1)),
        KeyCode::Down => Some(if selected < last { selected + 1 } else { last }),
        KeyCode::PageUp => Some(selected.saturating_sub(PAGE_STEP)),
        KeyCode::PageDown => {
            let target = selected + PAGE_STEP;
            Some(if target > last { last } else { target })
        }
        KeyCode::Home => Some(0),
        KeyCode::End => Some(last),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_handles_empty_lists() {
        assert_eq!(wrap_increment(0, 0), 0);
        assert_eq!(wrap_decrement(0, 0), 0);
        assert_eq!(wrap_decrement(0, 6), 5);
        assert_eq!(wrap_increment(5, 6), 0);
    }

    #[test]
    fn selection_clamps_to_rows() {
        assert_eq!(move_selection(0, 3, KeyCode::Up), Some(0));
        assert_eq!(move_selection(2, 3, KeyCode::Down), Some(2));
        assert_eq!(move_selection(1, 12, KeyCode::PageDown), Some(6));
        assert_eq!(move_selection(9, 12, KeyCode::PageDown), Some(11));
        assert_eq!(move_selection(4, 12, KeyCode::End), Some(11));
        assert_eq!(move_selection(4, 12, KeyCode::Char('x')), None);
    }

    #[test]
    fn text_editing() {
        let mut text = "ab".to_string();
        assert!(edit_text(&mut text, KeyCode::Char('c')));
        assert!(edit_text(&mut text, KeyCode::Backspace));
        assert!(!edit_text(&mut text, KeyCode::Enter));
        assert_eq!(text, "ab");
    }
}
