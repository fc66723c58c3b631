use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::persistence::Persistence;
use crate::io::system_theme::system_prefers_dark;
use crate::model::{Config, Task, UiConfig};
use crate::ops::due::parse_due_input;
use crate::ops::store::TodoStore;
use crate::ops::todo_ops::{Action, Effects};
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task (text and due fields)
    Add,
    /// Typing the search query
    Search,
}

/// Which field of the add form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Text,
    Due,
}

/// A single-line text field with a byte-offset cursor on a grapheme boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub buffer: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text, flattening newlines to spaces
    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace(['\n', '\r'], " ");
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }
}

/// Main application state
pub struct App {
    pub store: TodoStore,
    pub ui_config: UiConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Help overlay visible
    pub show_help: bool,
    pub add_field: AddField,
    pub text_input: TextInput,
    pub due_input: TextInput,
    /// Last submit was rejected because the due field didn't parse
    pub due_invalid: bool,
    pub search_input: TextInput,
    /// Index into the visible list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Fixed "now" for rendering (tests); None uses the wall clock
    pub clock: Option<DateTime<Utc>>,
}

impl App {
    pub fn new(store: TodoStore, ui_config: UiConfig) -> Self {
        let theme = Theme::for_mode(store.state().dark_mode, &ui_config);
        let search_input = TextInput {
            buffer: store.state().search.clone(),
            cursor: store.state().search.len(),
        };
        App {
            store,
            ui_config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            show_help: false,
            add_field: AddField::Text,
            text_input: TextInput::default(),
            due_input: TextInput::default(),
            due_invalid: false,
            search_input,
            cursor: 0,
            scroll_offset: 0,
            clock: None,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }

    /// Run an action through the store, then refresh view-side state
    pub fn dispatch(&mut self, action: Action) -> Effects {
        let effects = self.store.dispatch(action);
        if effects.theme_changed {
            self.apply_theme();
        }
        self.clamp_cursor();
        effects
    }

    /// Switch palettes to match the theme flag
    pub fn apply_theme(&mut self) {
        self.theme = Theme::for_mode(self.store.state().dark_mode, &self.ui_config);
    }

    pub fn visible_ids(&self) -> Vec<u64> {
        self.store.visible().iter().map(|t| t.id).collect()
    }

    /// Task under the cursor
    pub fn cursor_task(&self) -> Option<&Task> {
        self.store.visible().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.store.visible().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Submit the add form. Blank text or an unparseable due date leaves the form as is.
    /// Returns true when a task was created.
    pub fn submit_add(&mut self) -> bool {
        let due_date = match parse_due_input(&self.due_input.buffer) {
            Ok(due) => due,
            Err(e) => {
                tracing::debug!("rejecting add: {}", e);
                self.due_invalid = true;
                return false;
            }
        };
        self.due_invalid = false;

        let effects = self.dispatch(Action::Add {
            text: self.text_input.buffer.clone(),
            due_date,
        });
        let Some(id) = effects.added else {
            return false;
        };

        self.text_input.clear();
        self.due_input.clear();
        self.add_field = AddField::Text;
        if let Some(pos) = self.visible_ids().iter().position(|v| *v == id) {
            self.cursor = pos;
        }
        true
    }
}

/// Run the TUI application
pub fn run(config: Config, persistence: Persistence) -> Result<(), Box<dyn std::error::Error>> {
    let prefers_dark = system_prefers_dark(&config.ui);
    let store = TodoStore::open(persistence, prefers_dark);
    let mut app = App::new(store, config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // The timeout keeps relative due labels current while idle
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
