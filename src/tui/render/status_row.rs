use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::due::format_full_date;
use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    match app.mode {
        Mode::Navigate => {
            // Full due date of the focused task
            if let Some(due) = app.cursor_task().and_then(|t| t.due_date) {
                spans.push(Span::styled(
                    format!(" Due {}", format_full_date(due)),
                    Style::default().fg(app.theme.text).bg(bg),
                ));
            }
        }
        Mode::Add => {}
        Mode::Search => {
            let count = app.store.visible().len();
            let noun = if count == 1 { "match" } else { "matches" };
            spans.push(Span::styled(
                format!(" {} {}", count, noun),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    if app.ui_config.show_key_hints {
        let hint = key_hints(app.mode);
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                hint,
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "a add  space toggle  d delete  / search  ? help ",
        Mode::Add => "Enter add  Tab field  Esc cancel ",
        Mode::Search => "Enter keep  Esc clear ",
    }
}
