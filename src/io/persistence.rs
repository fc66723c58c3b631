use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::io::kv::{KeyValueStore, StoreError};
use crate::model::{MAX_ID, Snapshot, Task};

/// Key holding the serialized `{ todos, nextId }` blob
pub const STORAGE_KEY: &str = "todoApp";
/// Key holding `"dark"` or `"light"`
pub const THEME_KEY: &str = "todoAppTheme";

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored data is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored data has unexpected shape: {0}")]
    Shape(String),
}

/// Best-effort persistence of tasks and the theme preference.
///
/// The `try_*` methods report failures; the plain methods log a warning and
/// carry on, so callers never see an error.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Persistence { store }
    }

    /// Read the task blob. An absent blob yields the default snapshot.
    pub fn try_load(&self) -> Result<Snapshot, PersistError> {
        match self.store.get(STORAGE_KEY)? {
            None => Ok(Snapshot::default()),
            Some(raw) => decode_snapshot(&raw),
        }
    }

    /// Read the task blob, falling back to `{ todos: [], nextId: 1 }` on any failure.
    pub fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(snapshot) => {
                debug!(
                    todos = snapshot.todos.len(),
                    next_id = snapshot.next_id,
                    "loaded todos"
                );
                snapshot
            }
            Err(e) => {
                warn!("Failed to load todos from storage: {}", e);
                Snapshot::default()
            }
        }
    }

    pub fn try_save(&mut self, todos: &[Task], next_id: u64) -> Result<(), PersistError> {
        let raw = encode_snapshot(todos, next_id)?;
        self.store.set(STORAGE_KEY, &raw)?;
        Ok(())
    }

    /// Write the task blob. On failure the previously stored blob is left as it was.
    pub fn save(&mut self, todos: &[Task], next_id: u64) {
        match self.try_save(todos, next_id) {
            Ok(()) => {}
            Err(PersistError::Store(StoreError::QuotaExceeded { .. })) => {
                warn!("storage quota exceeded, todos not persisted");
            }
            Err(e) => warn!("Failed to save todos to storage: {}", e),
        }
    }

    pub fn try_clear(&mut self) -> Result<(), PersistError> {
        self.store.remove(STORAGE_KEY)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!("Failed to clear storage: {}", e);
        }
    }

    /// Stored theme preference, or `system_prefers_dark` when nothing is stored
    /// or the store can't be read.
    pub fn load_theme_preference(&self, system_prefers_dark: bool) -> bool {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => value.trim() == "dark",
            Ok(None) => system_prefers_dark,
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                system_prefers_dark
            }
        }
    }

    pub fn save_theme_preference(&mut self, dark: bool) {
        let value = if dark { "dark" } else { "light" };
        if let Err(e) = self.store.set(THEME_KEY, value) {
            warn!("Failed to save theme preference: {}", e);
        }
    }
}

fn encode_snapshot(todos: &[Task], next_id: u64) -> Result<String, serde_json::Error> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Blob<'a> {
        todos: &'a [Task],
        next_id: u64,
    }
    serde_json::to_string(&Blob { todos, next_id })
}

/// Decode a stored blob. Fields of the wrong shape fall back to their defaults
/// individually; only unparseable JSON or a non-object root is an error.
pub fn decode_snapshot(raw: &str) -> Result<Snapshot, PersistError> {
    let value: Value = serde_json::from_str(raw)?;
    let obj = value
        .as_object()
        .ok_or_else(|| PersistError::Shape("root is not an object".into()))?;

    let mut todos = Vec::new();
    match obj.get("todos") {
        Some(Value::Array(entries)) => {
            let mut seen = HashSet::new();
            for (i, entry) in entries.iter().enumerate() {
                let task: Task = match serde_json::from_value(entry.clone()) {
                    Ok(t) => t,
                    Err(e) => {
                        warn!("dropping malformed stored todo #{}: {}", i, e);
                        continue;
                    }
                };
                if task.id > MAX_ID {
                    warn!("dropping stored todo with out-of-range id {}", task.id);
                    continue;
                }
                if task.text.trim().is_empty() {
                    warn!("dropping stored todo {} with empty text", task.id);
                    continue;
                }
                if !seen.insert(task.id) {
                    warn!("dropping stored todo with duplicate id {}", task.id);
                    continue;
                }
                todos.push(task);
            }
        }
        Some(_) => warn!("stored todos is not an array, ignoring"),
        None => {}
    }

    let stored_next = obj
        .get("nextId")
        .and_then(as_positive_integer)
        .filter(|n| *n <= MAX_ID + 1);
    if stored_next.is_none() && obj.contains_key("nextId") {
        warn!("stored nextId is not a positive integer in range, resetting");
    }
    let mut next_id = stored_next.unwrap_or(1);

    if let Some(max_id) = todos.iter().map(|t| t.id).max()
        && next_id <= max_id
    {
        warn!(
            "stored nextId {} does not exceed highest id {}, raising",
            next_id, max_id
        );
        // max_id <= MAX_ID, so this can't overflow
        next_id = max_id + 1;
    }

    Ok(Snapshot { todos, next_id })
}

fn as_positive_integer(v: &Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        return (n > 0).then_some(n);
    }
    let f = v.as_f64()?;
    (f.fract() == 0.0 && f >= 1.0 && f <= u64::MAX as f64).then_some(f as u64)
}
