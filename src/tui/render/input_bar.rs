use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{AddField, App, Mode, TextInput};
use crate::util::unicode::{byte_offset_to_display_col, escape_control};

const TEXT_LABEL: &str = " Task ";
const DUE_LABEL: &str = " Due  ";
const DUE_HINT: &str = "YYYY-MM-DD [HH:MM]";

/// Rows taken by the input bar: the add form, the search line, or nothing
pub fn input_bar_height(app: &App) -> u16 {
    match app.mode {
        Mode::Add => 2,
        Mode::Search => 1,
        Mode::Navigate if !app.store.state().search.is_empty() => 1,
        Mode::Navigate => 0,
    }
}

pub fn render_input_bar(frame: &mut Frame, app: &App, area: Rect) {
    match app.mode {
        Mode::Add => render_add_form(frame, app, area),
        Mode::Search | Mode::Navigate => render_search_line(frame, app, area),
    }
}

fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let label_style = |focused: bool| {
        let style = Style::default().bg(bg);
        if focused {
            style.fg(app.theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            style.fg(app.theme.dim)
        }
    };
    let text_focused = app.add_field == AddField::Text;

    let text_line = Line::from(vec![
        Span::styled(TEXT_LABEL, label_style(text_focused)),
        Span::styled(
            escape_control(&app.text_input.buffer),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
    ]);

    let due_color = if app.due_invalid {
        app.theme.red
    } else {
        app.theme.text_bright
    };
    let mut due_spans = vec![
        Span::styled(DUE_LABEL, label_style(!text_focused)),
        Span::styled(
            escape_control(&app.due_input.buffer),
            Style::default().fg(due_color).bg(bg),
        ),
    ];
    if app.due_input.is_empty() {
        due_spans.push(Span::styled(
            DUE_HINT,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let rows = [text_line, Line::from(due_spans)];
    for (i, line) in rows.into_iter().enumerate() {
        if i as u16 >= area.height {
            break;
        }
        let row = Rect::new(area.x, area.y + i as u16, area.width, 1);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), row);
    }

    let (input, row) = if text_focused {
        (&app.text_input, 0)
    } else {
        (&app.due_input, 1)
    };
    if row < area.height {
        place_cursor(frame, input, area, TEXT_LABEL.len() as u16, row);
    }
}

fn render_search_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let editing = app.mode == Mode::Search;
    let query_color = if editing {
        app.theme.text_bright
    } else {
        app.theme.dim
    };

    let line = Line::from(vec![
        Span::styled(" /", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            escape_control(&app.search_input.buffer),
            Style::default().fg(query_color).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);

    if editing {
        place_cursor(frame, &app.search_input, area, 2, 0);
    }
}

fn place_cursor(frame: &mut Frame, input: &TextInput, area: Rect, offset: u16, row: u16) {
    let before = escape_control(&input.buffer[..input.cursor]);
    let col = byte_offset_to_display_col(&before, before.len()) as u16;
    let x = (area.x + offset + col).min(area.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y + row));
}
