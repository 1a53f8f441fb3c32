//! Keyboard input handler.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions;
use crate::tui::{AppState, Focus};

/// Handle keyboard input. Returns `true` when the user quits.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.error_message = None;
        }
        return Ok(false);
    }

    if let Some(help) = state.help.as_mut() {
        match key.code {
            KeyCode::Char('?' | 'q') | KeyCode::Esc => state.help = None,
            KeyCode::Up | KeyCode::Char('k') => help.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => help.scroll_down(),
            _ => {}
        }
        return Ok(false);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('?') => state.help = Some(crate::tui::HelpOverlayState::new()),
        KeyCode::Tab => {
            state.focus = match state.focus {
                Focus::Catalog => Focus::Grid,
                Focus::Grid => Focus::Catalog,
            };
        }
        KeyCode::Esc => actions::cancel(state),
        KeyCode::Char('r') => actions::rotate_selected(state),
        KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
            actions::delete_selected(state);
        }
        KeyCode::Char('L') => actions::load_next_starter(state),
        KeyCode::Char('C') => {
            state.store.clear_all();
            state.set_status("All modules removed");
        }
        KeyCode::Char('R') => {
            state.store.hard_reset();
            state.set_status("Configuration reset");
        }
        KeyCode::Char('+' | '=') => actions::resize_grid(state, 1),
        KeyCode::Char('-') => actions::resize_grid(state, -1),
        KeyCode::Char('0') => {
            state.store.reset_view();
        }
        KeyCode::Char('y') => actions::copy_summary(state),
        KeyCode::Char('e') => actions::export_document(state),
        KeyCode::Char('s') => actions::write_snapshot(state),
        _ => match state.focus {
            Focus::Catalog => handle_catalog_key(state, key.code),
            Focus::Grid => handle_grid_key(state, key.code),
        },
    }

    Ok(false)
}

fn handle_catalog_key(state: &mut AppState, code: KeyCode) {
    let count = state.presets().len();
    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.catalog_cursor = state.catalog_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.catalog_cursor + 1 < count {
                state.catalog_cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => actions::arm_highlighted_preset(state),
        _ => {}
    }
}

fn handle_grid_key(state: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => state.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => state.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => actions::activate_cursor(state),
        KeyCode::Char('m') => actions::begin_drag(state, state.cursor),
        _ => {}
    }
}
