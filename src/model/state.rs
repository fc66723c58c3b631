use serde::{Deserialize, Serialize};

use super::task::{Filter, Task};

/// Largest task id: the JavaScript safe-integer limit, so stored blobs stay
/// readable by the browser build.
pub const MAX_ID: u64 = (1 << 53) - 1;

/// The persisted blob: a snapshot of the task list and the id counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub todos: Vec<Task>,
    pub next_id: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
            todos: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory application state. Exactly one instance per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Tasks in insertion order
    pub todos: Vec<Task>,
    /// Id for the next created task; never reused
    pub next_id: u64,
    pub filter: Filter,
    /// Raw search text as typed
    pub search: String,
    pub sort_by_due_date: bool,
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::from_snapshot(Snapshot::default(), false)
    }
}

impl AppState {
    pub fn from_snapshot(snapshot: Snapshot, dark_mode: bool) -> Self {
        AppState {
            todos: snapshot.todos,
            next_id: snapshot.next_id,
            filter: Filter::All,
            search: String::new(),
            sort_by_due_date: false,
            dark_mode,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            todos: self.todos.clone(),
            next_id: self.next_id,
        }
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.todos.iter_mut().find(|t| t.id == id)
    }

    /// Count of tasks not yet completed
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }
}
