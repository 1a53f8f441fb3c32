//! Mouse input handler.
//!
//! Pointer positions go through [`GridViewport::screen_point_to_grid_cell`];
//! positions off the grid become `None` and clear the preview.
//!
//! [`GridViewport::screen_point_to_grid_cell`]: crate::tui::GridViewport::screen_point_to_grid_cell

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::actions;
use crate::models::InteractionMode;
use crate::tui::{AppState, CatalogPanel, Focus};

/// Handle mouse input
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) -> Result<()> {
    if state.help.is_some() || state.error_message.is_some() {
        return Ok(());
    }

    let grid = state.store.state().grid;
    let cell = state
        .viewport
        .screen_point_to_grid_cell(mouse.column, mouse.row, grid);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(row) = CatalogPanel::row_at(state.catalog_list_area, mouse.column, mouse.row)
            {
                if row < state.presets().len() {
                    state.focus = Focus::Catalog;
                    state.catalog_cursor = row;
                    actions::arm_highlighted_preset(state);
                }
                return Ok(());
            }
            let Some(cell) = cell else {
                return Ok(());
            };
            state.focus = Focus::Grid;
            state.cursor = cell;
            match state.mode() {
                InteractionMode::PresetArmed => {
                    state.refresh_preview();
                    actions::commit_placement(state);
                }
                InteractionMode::Dragging => actions::finish_drag(state),
                InteractionMode::Idle => {
                    if state.module_at(cell).is_some() {
                        actions::begin_drag(state, cell);
                    } else {
                        state.store.select_module(None);
                    }
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            if state.mode() == InteractionMode::Idle {
                return Ok(());
            }
            match cell {
                Some(cell) => {
                    state.cursor = cell;
                    state.refresh_preview();
                }
                None => {
                    state.store.update_preview(None);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.mode() == InteractionMode::Dragging {
                if cell.is_none() {
                    state.store.update_preview(None);
                }
                actions::finish_drag(state);
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some(id) = cell.and_then(|c| state.module_at(c)) {
                state.store.select_module(Some(&id));
                actions::rotate_selected(state);
            }
        }
        _ => {}
    }

    Ok(())
}
