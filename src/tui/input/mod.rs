mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{AddField, App, Mode};

use edit::{handle_add, handle_search};
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts everything; any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Search => handle_search(app, key),
    }
}

/// Handle a bracketed paste event. Only text fields accept pastes.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode {
        Mode::Add => match app.add_field {
            AddField::Text => app.text_input.insert_str(text),
            AddField::Due => {
                app.due_input.insert_str(text);
                app.due_invalid = false;
            }
        },
        Mode::Search => {
            app.search_input.insert_str(text);
            edit::sync_search(app);
        }
        Mode::Navigate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Filter;
    use crate::tui::render::test_helpers::{app_with_todos, empty_app};
    use pretty_assertions::assert_eq;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn texts(app: &App) -> Vec<String> {
        app.store.visible().iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn add_task_from_keyboard() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Add);
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(texts(&app), vec!["Buy milk"]);
        // Form stays open and empty for the next task
        assert_eq!(app.mode, Mode::Add);
        assert!(app.text_input.is_empty());
    }

    #[test]
    fn add_with_due_date() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Pay rent");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.add_field, AddField::Due);
        type_str(&mut app, "2030-01-15");
        press(&mut app, KeyCode::Enter);

        let todos = &app.store.state().todos;
        assert_eq!(todos.len(), 1);
        assert!(todos[0].due_date.is_some());
    }

    #[test]
    fn invalid_due_rejects_add() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Pay rent");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "soon");
        press(&mut app, KeyCode::Enter);

        assert!(app.store.state().todos.is_empty());
        assert!(app.due_invalid);
        assert_eq!(app.text_input.buffer, "Pay rent");

        // Editing the field clears the error
        press(&mut app, KeyCode::Backspace);
        assert!(!app.due_invalid);
    }

    #[test]
    fn blank_add_is_ignored() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.store.state().todos.is_empty());
        assert_eq!(app.store.state().next_id, 1);
    }

    #[test]
    fn esc_cancels_add() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.text_input.is_empty());
        assert!(app.store.state().todos.is_empty());
    }

    #[test]
    fn toggle_and_delete_under_cursor() {
        let mut app = app_with_todos(&["one", "two"]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.state().todos[1].completed);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(texts(&app), vec!["one"]);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn filter_keys() {
        let mut app = app_with_todos(&["one", "two"]);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.store.state().filter, Filter::Active);
        assert_eq!(texts(&app), vec!["two"]);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.store.state().filter, Filter::Completed);
        assert_eq!(texts(&app), vec!["one"]);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(texts(&app).len(), 2);
    }

    #[test]
    fn search_filters_live() {
        let mut app = app_with_todos(&["Buy milk", "Walk dog"]);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "MIL");
        assert_eq!(texts(&app), vec!["Buy milk"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.state().search, "MIL");

        // Esc in navigate clears the kept query
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store.state().search, "");
        assert_eq!(texts(&app).len(), 2);
    }

    #[test]
    fn esc_in_search_clears_query() {
        let mut app = app_with_todos(&["Buy milk", "Walk dog"]);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "dog");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(texts(&app).len(), 2);
    }

    #[test]
    fn theme_and_sort_toggles() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('t'));
        assert!(app.store.state().dark_mode);
        assert!(app.theme.dark);
        press(&mut app, KeyCode::Char('s'));
        assert!(app.store.state().sort_by_due_date);
    }

    #[test]
    fn help_swallows_next_key() {
        let mut app = app_with_todos(&["one"]);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.show_help);
        assert_eq!(texts(&app), vec!["one"]);
    }

    #[test]
    fn quit_keys() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('a'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);

        let mut app = empty_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn typing_q_in_add_mode_is_text() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "quit smoking");
        assert!(!app.should_quit);
        assert_eq!(app.text_input.buffer, "quit smoking");
    }

    #[test]
    fn paste_goes_to_focused_field() {
        let mut app = app_with_todos(&["Buy milk", "Walk dog"]);
        handle_paste(&mut app, "ignored");
        assert_eq!(app.store.state().search, "");

        press(&mut app, KeyCode::Char('/'));
        handle_paste(&mut app, "walk");
        assert_eq!(texts(&app), vec!["Walk dog"]);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));
        handle_paste(&mut app, "line one\nline two");
        assert_eq!(app.text_input.buffer, "line one line two");
    }
}
