use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Filter, Task};
use crate::ops::due::format_distance_to_now;
use crate::ops::visible::{is_overdue, search_highlight_re};
use crate::tui::app::App;
use crate::util::unicode::{display_width, escape_control, truncate_to_width};

use super::push_highlighted_spans;

/// Render the filtered task list, scrolled so the cursor row stays on screen
pub fn render_todo_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = area.height as usize;
    let len = app.store.visible().len();
    adjust_scroll(app, len, height);

    let app = &*app;
    let bg = app.theme.background;

    if len == 0 {
        let msg = Line::from(Span::styled(
            format!("  {}", empty_message(app)),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(msg).style(Style::default().bg(bg)), area);
        return;
    }

    let search_re = search_highlight_re(&app.store.state().search);
    let now = app.now();
    let lines: Vec<Line> = app
        .store
        .visible()
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, task)| {
            let row = TodoRow {
                task,
                is_cursor: i == app.cursor,
                overdue: is_overdue(task, now),
                due_label: task.due_date.map(|due| format_distance_to_now(due, now)),
            };
            render_row(app, &row, search_re.as_ref(), area.width as usize)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

struct TodoRow<'a> {
    task: &'a Task,
    is_cursor: bool,
    overdue: bool,
    due_label: Option<String>,
}

fn adjust_scroll(app: &mut App, len: usize, height: usize) {
    if height == 0 || len == 0 {
        app.scroll_offset = 0;
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
    // Don't leave blank rows below the last task
    app.scroll_offset = app.scroll_offset.min(len.saturating_sub(height));
}

fn empty_message(app: &App) -> String {
    let state = app.store.state();
    if state.todos.is_empty() {
        return "No tasks yet. Press a to add one.".to_string();
    }
    if !state.search.is_empty() {
        return format!("No tasks match \"{}\".", escape_control(&state.search));
    }
    match state.filter {
        Filter::Active => "Nothing left to do.".to_string(),
        Filter::Completed => "No completed tasks yet.".to_string(),
        Filter::All => "No tasks.".to_string(),
    }
}

fn render_row<'a>(
    app: &App,
    row: &TodoRow,
    search_re: Option<&regex::Regex>,
    width: usize,
) -> Line<'a> {
    let theme = &app.theme;
    let bg = if row.is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);

    let mut text_style = base.fg(if row.is_cursor {
        theme.text_bright
    } else {
        theme.text
    });
    if row.task.completed {
        text_style = base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT);
    }
    let highlight_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    let marker = if row.is_cursor { "\u{25B8} " } else { "  " };
    let (checkbox, checkbox_style) = if row.task.completed {
        ("[x] ", base.fg(theme.green))
    } else {
        ("[ ] ", base.fg(theme.dim))
    };

    // Right side: due label, overdue mark, delete hint on the cursor row
    let mut right: Vec<Span> = Vec::new();
    if let Some(label) = &row.due_label {
        let style = if row.overdue {
            base.fg(theme.red)
        } else {
            base.fg(theme.dim)
        };
        if row.overdue {
            right.push(Span::styled("! ", style.add_modifier(Modifier::BOLD)));
        }
        right.push(Span::styled(label.clone(), style));
    }
    if row.is_cursor {
        right.push(Span::styled(" \u{00D7}", base.fg(theme.red)));
    }
    right.push(Span::styled(" ", base));

    let right_width: usize = right.iter().map(|s| display_width(&s.content)).sum();
    let left_width = display_width(marker) + display_width(checkbox);
    let text_budget = width.saturating_sub(left_width + right_width + 1);
    let text = truncate_to_width(&escape_control(&row.task.text), text_budget);
    let text_width = display_width(&text);

    let mut spans = vec![
        Span::styled(marker, base.fg(theme.highlight)),
        Span::styled(checkbox, checkbox_style),
    ];
    push_highlighted_spans(&mut spans, &text, text_style, highlight_style, search_re);

    let used = left_width + text_width + right_width;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    spans.extend(right);
    Line::from(spans)
}
