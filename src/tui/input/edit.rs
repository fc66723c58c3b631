use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::todo_ops::Action;
use crate::tui::app::{AddField, App, Mode, TextInput};

/// Line-editing keys shared by every text field. Returns true if the buffer changed.
fn edit_field(input: &mut TextInput, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => input.home(),
        KeyCode::Char('e') if ctrl => input.end(),
        KeyCode::Char('u') if ctrl => {
            input.clear();
            return true;
        }
        KeyCode::Char('w') if ctrl => {
            input.delete_word_back();
            return true;
        }
        KeyCode::Char(c) if !ctrl => {
            input.insert_char(c);
            return true;
        }
        KeyCode::Backspace => {
            input.backspace();
            return true;
        }
        KeyCode::Delete => {
            input.delete();
            return true;
        }
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
    false
}

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.text_input.clear();
            app.due_input.clear();
            app.due_invalid = false;
            app.add_field = AddField::Text;
            app.mode = Mode::Navigate;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.add_field = match app.add_field {
                AddField::Text => AddField::Due,
                AddField::Due => AddField::Text,
            };
        }
        KeyCode::Enter => {
            app.submit_add();
        }
        _ => match app.add_field {
            AddField::Text => {
                edit_field(&mut app.text_input, key);
            }
            AddField::Due => {
                if edit_field(&mut app.due_input, key) {
                    app.due_invalid = false;
                }
            }
        },
    }
}

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Esc => {
            app.search_input.clear();
            sync_search(app);
            app.mode = Mode::Navigate;
        }
        _ => {
            if edit_field(&mut app.search_input, key) {
                sync_search(app);
            }
        }
    }
}

/// Push the search field into state so the list filters as the user types
pub(super) fn sync_search(app: &mut App) {
    let query = app.search_input.buffer.clone();
    app.dispatch(Action::SetSearch(query));
    app.cursor = 0;
    app.scroll_offset = 0;
}
