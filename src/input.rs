//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] operations. Which keys are live
//! depends on the screen: search bar, list, or detail.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::host::Host;
use crate::view::ItemAction;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events so that each physical keypress triggers
/// exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent, host: &mut dyn Host) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.filtering {
        handle_filter_key(app, key);
    } else if app.detail().is_some() {
        handle_detail_key(app, key, host);
    } else {
        handle_list_key(app, key, host);
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.clear_filter(),
        (KeyCode::Enter, _) => app.commit_filter(),
        (KeyCode::Backspace, _) => app.pop_filter_char(),
        (KeyCode::Down, _) => app.select_next(),
        (KeyCode::Up, _) => app.select_previous(),
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => app.push_filter_char(c),
        _ => {}
    }
}

/// Shortcuts shared by the list and the detail screen.
fn link_action(key: KeyEvent) -> Option<ItemAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('o'), _) | (KeyCode::Enter, KeyModifiers::CONTROL) => {
            Some(ItemAction::OpenInBrowser)
        }
        (KeyCode::Char('c'), KeyModifiers::NONE) | (KeyCode::Char('.'), KeyModifiers::CONTROL) => {
            Some(ItemAction::CopyLink)
        }
        _ => None,
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent, host: &mut dyn Host) {
    if let Some(action) = link_action(key) {
        app.perform(action, host);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            if !app.filter.is_empty() && key.code == KeyCode::Esc {
                app.clear_filter();
            } else {
                app.quit = true;
            }
        }
        KeyCode::Char('/') => app.start_filter(),
        KeyCode::Enter => app.perform(ItemAction::ShowDetails, host),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent, host: &mut dyn Host) {
    if let Some(action) = link_action(key) {
        app.perform(action, host);
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            app.pop();
        }
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        _ => {}
    }
}
