use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Filter;
use crate::ops::todo_ops::Action;
use crate::tui::app::{AddField, App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.store.visible().len().saturating_sub(1);
        }

        // Task actions
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.mode = Mode::Add;
            app.add_field = AddField::Text;
        }
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
            if let Some(id) = app.cursor_task().map(|t| t.id) {
                app.dispatch(Action::Toggle(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.cursor_task().map(|t| t.id) {
                app.dispatch(Action::Delete(id));
            }
        }

        // View controls
        KeyCode::Char('1') => set_filter(app, Filter::All),
        KeyCode::Char('2') => set_filter(app, Filter::Active),
        KeyCode::Char('3') => set_filter(app, Filter::Completed),
        KeyCode::Tab => {
            let next = app.store.state().filter.next();
            set_filter(app, next);
        }
        KeyCode::Char('s') => {
            app.dispatch(Action::ToggleSortByDueDate);
        }
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.search_input.end();
        }
        KeyCode::Char('t') => {
            app.dispatch(Action::ToggleDarkMode);
        }
        KeyCode::Esc => {
            // Esc in navigate clears an active search
            if !app.store.state().search.is_empty() {
                app.search_input.clear();
                app.dispatch(Action::SetSearch(String::new()));
            }
        }
        _ => {}
    }
}

fn set_filter(app: &mut App, filter: Filter) {
    app.dispatch(Action::SetFilter(filter));
    app.cursor = 0;
    app.scroll_offset = 0;
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.store.visible().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(len - 1);
}
