//! Actions shared by keyboard and mouse handlers.
//!
//! Each action talks to the store through its typed commands and reports
//! the result in the status bar.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::constants::APP_BINARY_NAME;
use crate::engine::placement::required_extent;
use crate::engine::DragOutcome;
use crate::export::{render_plan_diagram, to_document, to_summary_text, SnapshotRequest};
use crate::models::{GridCell, InteractionMode};
use crate::tui::{AppState, Focus};

/// Arms the preset under the catalog cursor and moves focus to the grid.
pub fn arm_highlighted_preset(state: &mut AppState) {
    let Some(preset) = state.highlighted_preset() else {
        return;
    };
    let (id, name) = (preset.id.clone(), preset.name.clone());
    state.store.set_selected_preset(Some(&id));
    state.focus = Focus::Grid;
    state.refresh_preview();
    state.set_status(format!("Placing {name}: choose a cell and press Enter"));
}

/// Enter on the grid: place, drop, or select depending on the mode.
pub fn activate_cursor(state: &mut AppState) {
    match state.mode() {
        InteractionMode::PresetArmed => commit_placement(state),
        InteractionMode::Dragging => finish_drag(state),
        InteractionMode::Idle => {
            let target = state.module_at(state.cursor);
            state.store.select_module(target.as_deref());
        }
    }
}

/// Places the armed preset at the current preview.
pub fn commit_placement(state: &mut AppState) {
    if state.store.commit_preview().is_some() {
        state.set_status(format!(
            "Module placed ({} total)",
            state.store.module_count()
        ));
    } else {
        state.set_status("Cannot place here: occupied or outside the grid");
    }
}

/// Picks up the module at `cell` (or the selected one) for moving.
pub fn begin_drag(state: &mut AppState, cell: GridCell) {
    let target = state
        .module_at(cell)
        .or_else(|| state.store.state().selected_module_id.clone());
    let Some(id) = target else {
        state.set_status("No module to move");
        return;
    };
    let Some(anchor) = state.store.state().find_module(&id).map(|m| m.anchor()) else {
        return;
    };
    if state.store.start_drag(&id) {
        state.grab_offset = (cell.x - anchor.x, cell.z - anchor.z);
        if state.module_at(cell).as_deref() != Some(id.as_str()) {
            // Keyboard move of the selection: jump the cursor onto the anchor
            state.cursor = anchor;
            state.grab_offset = (0, 0);
        }
        state.refresh_preview();
        state.set_status("Moving module: Enter to drop, Esc to cancel");
    }
}

/// Releases the dragged module.
pub fn finish_drag(state: &mut AppState) {
    match state.store.stop_drag() {
        DragOutcome::Moved => state.set_status("Module moved"),
        DragOutcome::SnappedBack => state.set_status("Module returned to its position"),
        DragOutcome::NotDragging => {}
    }
    state.grab_offset = (0, 0);
}

/// Esc: cancel a drag, disarm the preset, or clear the selection.
pub fn cancel(state: &mut AppState) {
    match state.mode() {
        InteractionMode::Dragging => {
            state.store.clear_preview();
            finish_drag(state);
        }
        InteractionMode::PresetArmed => {
            state.store.set_selected_preset(None);
            state.set_status("Placement cancelled");
        }
        InteractionMode::Idle => {
            state.store.select_module(None);
        }
    }
}

/// Rotates the selected module and warns when it now collides.
pub fn rotate_selected(state: &mut AppState) {
    let Some(id) = state.store.state().selected_module_id.clone() else {
        state.set_status("Select a module to rotate");
        return;
    };
    if state.store.rotate_selected() {
        if state.store.conflicts().contains(&id) {
            state.set_status("Rotated: module now overlaps or leaves the grid");
        } else {
            state.set_status("Rotated");
        }
    }
}

/// Removes the selected module.
pub fn delete_selected(state: &mut AppState) {
    if state.store.delete_selected() {
        state.set_status("Module removed");
    } else {
        state.set_status("Select a module to remove");
    }
}

/// Loads the next starter layout of the catalog.
pub fn load_next_starter(state: &mut AppState) {
    let starters = &state.store.catalog().starters;
    if starters.is_empty() {
        return;
    }
    let starter = &starters[state.starter_cursor % starters.len()];
    let (id, name) = (starter.id.clone(), starter.name.clone());
    state.starter_cursor = (state.starter_cursor + 1) % starters.len();

    state.store.load_preset(&id);
    state.set_status(format!("Loaded starter '{name}'"));
}

/// Grows or shrinks both grid axes by `delta` cells.
pub fn resize_grid(state: &mut AppState, delta: i64) {
    let grid = state.store.state().grid;
    let cells_x = u32::try_from(i64::from(grid.cells_x) + delta).unwrap_or(0);
    let cells_z = u32::try_from(i64::from(grid.cells_z) + delta).unwrap_or(0);

    if state.store.set_grid_size(cells_x, cells_z) {
        state.set_status(format!("Grid resized to {cells_x}x{cells_z}"));
    } else if let Some((need_x, need_z)) =
        required_extent(state.store.state(), state.store.catalog())
    {
        state.set_status(format!(
            "Cannot resize to {cells_x}x{cells_z}: modules need at least {need_x}x{need_z}"
        ));
    } else {
        state.set_status(format!("Invalid grid size {cells_x}x{cells_z}"));
    }
}

/// Copies the text summary to the system clipboard.
pub fn copy_summary(state: &mut AppState) {
    let document = to_document(state.store.state(), state.store.catalog(), Utc::now());
    let text = to_summary_text(&document);

    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => state.set_status("Summary copied to clipboard"),
        Err(e) => state.set_error(format!("Failed to copy to clipboard: {e}")),
    }
}

/// Writes the plan as a text capture, named by [`SnapshotRequest`].
pub fn write_snapshot(state: &mut AppState) {
    let request = SnapshotRequest::with_extension(state.store.state(), Utc::now(), "txt");
    let content = render_plan_diagram(state.store.state(), state.store.catalog());
    match write_to_data_dir(state, &request.filename, &content) {
        Ok(path) => state.set_status(format!("Snapshot saved to {}", path.display())),
        Err(e) => state.set_error(format!("{e:#}")),
    }
}

/// Writes the JSON export document to the data directory.
pub fn export_document(state: &mut AppState) {
    let now = Utc::now();
    let document = to_document(state.store.state(), state.store.catalog(), now);
    let filename = format!("{APP_BINARY_NAME}-export-{}.json", now.format("%Y%m%d-%H%M%S"));
    let result = document
        .to_json_pretty()
        .and_then(|json| write_to_data_dir(state, &filename, &json));
    match result {
        Ok(path) => state.set_status(format!("Exported to {}", path.display())),
        Err(e) => state.set_error(format!("{e:#}")),
    }
}

fn write_to_data_dir(state: &AppState, filename: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(&state.data_dir).with_context(|| {
        format!(
            "Failed to create data directory: {}",
            state.data_dir.display()
        )
    })?;
    let path = state.data_dir.join(filename);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
