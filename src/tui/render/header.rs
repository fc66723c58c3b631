use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render the header: app badge, filter tabs, and view indicators, with a separator below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let sep = "\u{2500}".repeat(area.width as usize);
    let sep = Paragraph::new(Span::styled(
        sep,
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    frame.render_widget(sep, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let state = app.store.state();

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "[x]",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", bg_style),
    ];

    let sep = Span::styled("\u{2502}", dim_style);
    spans.push(sep.clone());
    for filter in Filter::ALL {
        spans.push(Span::styled(
            format!(" {} ", filter.label()),
            tab_style(app, filter == state.filter),
        ));
        spans.push(sep.clone());
    }

    // Right-aligned indicators
    let mut indicators: Vec<Span> = Vec::new();
    if state.sort_by_due_date {
        indicators.push(Span::styled(
            "\u{21C5} due  ",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    let theme_icon = if state.dark_mode { "\u{263E}  " } else { "\u{2600}  " };
    indicators.push(Span::styled(theme_icon, dim_style));
    indicators.push(Span::styled(
        format!("{} left ", state.active_count()),
        Style::default().fg(app.theme.text).bg(bg),
    ));

    let left_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right_width: usize = indicators.iter().map(|s| display_width(&s.content)).sum();
    let width = area.width as usize;
    if left_width + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - left_width - right_width),
            bg_style,
        ));
        spans.extend(indicators);
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}
