use chrono::{DateTime, TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::kv::{KeyValueStore, MemoryStore};
use crate::io::persistence::{Persistence, STORAGE_KEY};
use crate::model::{Snapshot, Task, UiConfig};
use crate::ops::store::TodoStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Fixed clock used by every rendered test
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an in-memory store seeded with `todos`, light theme, fixed clock.
pub fn app_with_tasks(todos: Vec<Task>) -> App {
    let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let mut store = MemoryStore::new();
    let blob = serde_json::to_string(&Snapshot { todos, next_id }).unwrap();
    store.set(STORAGE_KEY, &blob).unwrap();

    let todo_store = TodoStore::open(Persistence::new(Box::new(store)), false);
    let mut app = App::new(todo_store, UiConfig::default());
    app.clock = Some(test_now());
    app
}

/// An App with undated, incomplete tasks numbered from 1.
pub fn app_with_todos(texts: &[&str]) -> App {
    let todos = texts
        .iter()
        .enumerate()
        .map(|(i, text)| Task::new(i as u64 + 1, *text, None))
        .collect();
    app_with_tasks(todos)
}

/// An empty App
pub fn empty_app() -> App {
    app_with_tasks(Vec::new())
}
