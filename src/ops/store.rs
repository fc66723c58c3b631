use tracing::debug;

use crate::io::persistence::Persistence;
use crate::model::{AppState, Task};

use super::todo_ops::{self, Action, Effects};
use super::visible;

/// Owns the application state and mirrors task data to persistence.
pub struct TodoStore {
    state: AppState,
    persistence: Persistence,
}

impl TodoStore {
    /// Restore tasks and the theme preference from `persistence`.
    pub fn open(persistence: Persistence, system_prefers_dark: bool) -> Self {
        let snapshot = persistence.load();
        let dark_mode = persistence.load_theme_preference(system_prefers_dark);
        TodoStore {
            state: AppState::from_snapshot(snapshot, dark_mode),
            persistence,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action, then persist whatever it changed. Persistence
    /// failures are logged inside `Persistence` and never undo the change.
    pub fn dispatch(&mut self, action: Action) -> Effects {
        debug!(?action, "dispatch");
        let effects = todo_ops::apply(&mut self.state, action);
        if effects.todos_changed {
            self.persistence.save(&self.state.todos, self.state.next_id);
        }
        if effects.theme_changed {
            self.persistence.save_theme_preference(self.state.dark_mode);
        }
        effects
    }

    /// Derived list for display
    pub fn visible(&self) -> Vec<&Task> {
        visible::visible_todos(&self.state)
    }
}
