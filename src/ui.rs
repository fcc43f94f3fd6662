//! Terminal UI rendering.
//!
//! Draws the view models from [`crate::view`] with ratatui. The layout is a
//! search bar on top, the list (or the pushed detail screen) in the middle
//! and a one-line status bar at the bottom.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::host::{Toast, ToastStyle};
use crate::view::{DetailView, ItemAction, ListView};

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, toast: Option<&Toast>, frame: &mut Frame) {
    let [search_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    match app.detail() {
        Some(detail) => {
            draw_detail(detail, app.detail_scroll, frame, main_area);
            draw_help(&ItemAction::DETAIL, "Esc: back", frame, search_area);
        }
        None => {
            let view = ListView::build(&app.news.items, &app.filter, app.news.is_loading, &Local);
            draw_search_bar(app, view.search_placeholder, frame, search_area);
            let feed_is_empty = app.news.items.is_empty();
            draw_list(&view, feed_is_empty, &mut app.list_state, frame, main_area);
        }
    }
    draw_status_bar(app, toast, frame, status_area);
}

fn draw_search_bar(app: &App, placeholder: &str, frame: &mut Frame, area: Rect) {
    let line = if app.filtering || !app.filter.is_empty() {
        let cursor = if app.filtering { "▏" } else { "" };
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(Color::Cyan)),
            Span::raw(app.filter.as_str()),
            Span::raw(cursor),
        ])
    } else {
        Line::from(Span::styled(
            format!(" / {placeholder}"),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the sectioned list. Section headers take a line each, so the
/// row selection is shifted by the headers above it before drawing.
fn draw_list(
    view: &ListView,
    feed_is_empty: bool,
    list_state: &mut ListState,
    frame: &mut Frame,
    area: Rect,
) {
    let selected = list_state.selected();

    let mut list_items = Vec::new();
    let mut display_selected = None;
    // Header line to keep visible when the selection is a section's first row.
    let mut pinned_header = None;
    let mut row_index = 0;

    for section in &view.sections {
        let header_index = list_items.len();
        list_items.push(ListItem::new(Line::from(Span::styled(
            section.title(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))));

        for (i, row) in section.rows.iter().enumerate() {
            if selected == Some(row_index) {
                display_selected = Some(list_items.len());
                if i == 0 {
                    pinned_header = Some(header_index);
                }
            }
            list_items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("{:<10}", row.date), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(row.title, Style::default().fg(Color::White)),
            ])));
            row_index += 1;
        }
    }

    let title = if view.is_loading {
        " Gamekult · loading… ".to_string()
    } else if feed_is_empty {
        " Gamekult · no news ".to_string()
    } else if view.sections.is_empty() {
        " Gamekult · no match ".to_string()
    } else {
        format!(" Gamekult · {} ", view.row_count())
    };

    let list = List::new(list_items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    let offset = match pinned_header {
        Some(header) => list_state.offset().min(header),
        None => list_state.offset(),
    };
    let mut state = ListState::default()
        .with_offset(offset)
        .with_selected(display_selected);
    frame.render_stateful_widget(list, area, &mut state);
    *list_state.offset_mut() = state.offset();
}

fn draw_detail(detail: &DetailView, scroll: u16, frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Text::raw(detail.markdown.as_str()))
        .block(
            Block::default()
                .title(format!(" {} ", detail.navigation_title))
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_help(actions: &[ItemAction], extra: &str, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for action in actions {
        spans.push(Span::styled(action.shortcut(), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {}  ", action.title())));
    }
    spans.push(Span::raw(extra.to_string()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Bottom line: the latest toast if any, otherwise key hints.
fn draw_status_bar(app: &App, toast: Option<&Toast>, frame: &mut Frame, area: Rect) {
    let line = match toast {
        Some(toast) => {
            let color = match toast.style {
                ToastStyle::Success => Color::Green,
                ToastStyle::Failure => Color::Red,
            };
            let mut spans = vec![Span::styled(
                format!(" {}", toast.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )];
            if let Some(message) = &toast.message {
                spans.push(Span::styled(format!("  {message}"), Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        }
        None if app.detail().is_some() => Line::raw(" j/k: scroll  q: quit"),
        None => {
            let hints: Vec<String> = ItemAction::LIST
                .iter()
                .map(|a| format!("{}: {}", a.shortcut(), a.title()))
                .collect();
            Line::raw(format!(" {}  /: filter  q: quit", hints.join("  ")))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
