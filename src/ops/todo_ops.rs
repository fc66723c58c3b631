use chrono::{DateTime, Utc};

use tracing::warn;

use crate::model::{AppState, Filter, MAX_ID, Task};

/// A user action applied to the application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add {
        text: String,
        due_date: Option<DateTime<Utc>>,
    },
    Toggle(u64),
    Delete(u64),
    SetFilter(Filter),
    SetSearch(String),
    ToggleSortByDueDate,
    ToggleDarkMode,
}

/// What an action changed, so the caller knows what to persist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    /// Task data (list or counter) changed
    pub todos_changed: bool,
    /// Theme flag changed
    pub theme_changed: bool,
    /// Id of a newly created task
    pub added: Option<u64>,
}

/// Apply `action` to `state`. Every action is safe to repeat; unknown ids
/// and blank text are no-ops.
pub fn apply(state: &mut AppState, action: Action) -> Effects {
    match action {
        Action::Add { text, due_date } => {
            let added = add_todo(state, &text, due_date);
            Effects {
                todos_changed: added.is_some(),
                added,
                ..Default::default()
            }
        }
        Action::Toggle(id) => Effects {
            todos_changed: toggle_todo(state, id),
            ..Default::default()
        },
        Action::Delete(id) => Effects {
            todos_changed: delete_todo(state, id),
            ..Default::default()
        },
        Action::SetFilter(filter) => {
            state.filter = filter;
            Effects::default()
        }
        Action::SetSearch(query) => {
            state.search = query;
            Effects::default()
        }
        Action::ToggleSortByDueDate => {
            state.sort_by_due_date = !state.sort_by_due_date;
            Effects::default()
        }
        Action::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            Effects {
                theme_changed: true,
                ..Default::default()
            }
        }
    }
}

/// Append a task with the next id. Returns the id, or None if `text` is blank
/// or the id space is used up.
pub fn add_todo(state: &mut AppState, text: &str, due_date: Option<DateTime<Utc>>) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let id = state.next_id;
    if id > MAX_ID {
        warn!("task ids exhausted at {}, rejecting add", id);
        return None;
    }
    state.todos.push(Task::new(id, text, due_date));
    state.next_id = id + 1;
    Some(id)
}

/// Flip `completed` on the task with `id`. Returns false if no such task.
pub fn toggle_todo(state: &mut AppState, id: u64) -> bool {
    match state.find_mut(id) {
        Some(task) => {
            task.completed = !task.completed;
            true
        }
        None => false,
    }
}

/// Remove the task with `id`. Returns false if no such task.
pub fn delete_todo(state: &mut AppState, id: u64) -> bool {
    let before = state.todos.len();
    state.todos.retain(|t| t.id != id);
    state.todos.len() != before
}
