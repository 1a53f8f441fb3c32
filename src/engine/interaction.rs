//! Interaction state machine: armed preset, drag lifecycle and ghost preview.
//!
//! Front ends translate their native input into these calls:
//!
//! ```text
//! Idle ──set_selected_preset(Some)──▶ PresetArmed ──commit_preview (valid)──▶ Idle
//!  │                                      │
//!  │                                      └─set_selected_preset(None)──▶ Idle
//!  └──start_drag──▶ Dragging ──update_preview × N──▶ stop_drag ──▶ Idle
//! ```
//!
//! Entering `PresetArmed` cancels a drag and entering `Dragging` disarms the
//! preset, so the two are never active together. Leaving either state clears
//! the preview.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{ConfiguratorState, Footprint, GridCell, InteractionMode, PlacedModule};

use super::geometry::within_bounds;
use super::occupancy::module_footprint;
use super::placement::{self, add_module, can_move, can_place};

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragOutcome {
    /// The instance now sits at the released cell
    Moved,
    /// The release target was invalid or unchanged; nothing was mutated
    SnappedBack,
    /// No drag was in progress
    NotDragging,
}

impl fmt::Display for DragOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Moved => "moved",
            Self::SnappedBack => "snapped back",
            Self::NotDragging => "not dragging",
        };
        f.write_str(label)
    }
}

/// Translucent preview of where the armed preset or dragged instance would land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ghost {
    /// Preset being previewed
    pub preset_id: String,
    /// Candidate anchor
    pub anchor: GridCell,
    /// Footprint drawn at the anchor (rotated for dragged instances)
    pub footprint: Footprint,
    /// Whether releasing here would succeed
    pub is_valid: bool,
}

/// Arms a preset for placement, or returns to `Idle` with `None`.
///
/// Arming an unknown preset is a no-op. Returns whether the state changed.
pub fn set_selected_preset(
    state: &mut ConfiguratorState,
    catalog: &Catalog,
    preset_id: Option<&str>,
) -> bool {
    match preset_id {
        Some(id) => {
            if catalog.find_module(id).is_none() {
                debug!(preset_id = id, "ignored unknown preset");
                return false;
            }
            let interaction = &mut state.interaction;
            interaction.clear_drag();
            interaction.clear_preview();
            interaction.selected_preset_id = Some(id.to_string());
            true
        }
        None => {
            if state.interaction.mode() == InteractionMode::Idle
                && state.interaction.preview_position.is_none()
            {
                return false;
            }
            state.interaction.reset();
            true
        }
    }
}

/// Picks up a placed instance. Disarms any preset and selects the instance.
pub fn start_drag(state: &mut ConfiguratorState, instance_id: &str) -> bool {
    let Some(origin) = state.find_module(instance_id).map(PlacedModule::anchor) else {
        return false;
    };

    let interaction = &mut state.interaction;
    interaction.selected_preset_id = None;
    interaction.clear_preview();
    interaction.dragging_instance_id = Some(instance_id.to_string());
    interaction.drag_origin = Some(origin);
    state.selected_module_id = Some(instance_id.to_string());
    debug!(instance_id, %origin, "drag started");
    true
}

/// Records the cell under the pointer and whether it is a legal target.
///
/// `None` means the pointer left the grid and clears the preview. Ignored
/// while `Idle`. Returns whether the state changed.
pub fn update_preview(
    state: &mut ConfiguratorState,
    catalog: &Catalog,
    cell: Option<GridCell>,
) -> bool {
    let Some(cell) = cell else {
        return clear_preview(state);
    };

    let is_valid = match state.interaction.mode() {
        InteractionMode::Idle => return false,
        InteractionMode::PresetArmed => state
            .interaction
            .selected_preset_id
            .as_deref()
            .is_some_and(|preset_id| can_place(state, catalog, preset_id, cell.x, cell.z, None)),
        InteractionMode::Dragging => state
            .interaction
            .dragging_instance_id
            .as_deref()
            .is_some_and(|instance_id| can_move(state, catalog, instance_id, cell.x, cell.z)),
    };

    let interaction = &mut state.interaction;
    if interaction.preview_position == Some(cell) && interaction.is_valid_position == is_valid {
        return false;
    }
    interaction.preview_position = Some(cell);
    interaction.is_valid_position = is_valid;
    true
}

/// Drops the preview without changing the mode.
pub fn clear_preview(state: &mut ConfiguratorState) -> bool {
    let interaction = &mut state.interaction;
    if interaction.preview_position.is_none() && !interaction.is_valid_position {
        return false;
    }
    interaction.clear_preview();
    true
}

/// Places the armed preset at the current preview and returns to `Idle`.
///
/// Does nothing unless a preset is armed and the preview is valid.
pub fn commit_preview(state: &mut ConfiguratorState, catalog: &Catalog) -> Option<String> {
    let interaction = &state.interaction;
    if interaction.mode() != InteractionMode::PresetArmed || !interaction.is_valid_position {
        return None;
    }
    let preset_id = interaction.selected_preset_id.clone()?;
    let cell = interaction.preview_position?;

    let instance_id = add_module(state, catalog, &preset_id, cell.x, cell.z)?;
    state.interaction.reset();
    Some(instance_id)
}

/// Releases the dragged instance.
///
/// Moves it when the last preview is valid and differs from the origin;
/// otherwise it snaps back untouched. Always ends in `Idle` with no preview.
pub fn stop_drag(state: &mut ConfiguratorState, catalog: &Catalog) -> DragOutcome {
    let Some(instance_id) = state.interaction.dragging_instance_id.clone() else {
        return DragOutcome::NotDragging;
    };

    let interaction = &state.interaction;
    let target = interaction
        .preview_position
        .filter(|cell| interaction.is_valid_position && Some(*cell) != interaction.drag_origin);

    let moved = target
        .is_some_and(|cell| placement::move_module(state, catalog, &instance_id, cell.x, cell.z));
    state.interaction.reset();

    if moved {
        DragOutcome::Moved
    } else {
        debug!(%instance_id, "drag snapped back");
        DragOutcome::SnappedBack
    }
}

/// Removes the selected instance. Ignored while dragging.
pub fn delete_selected(state: &mut ConfiguratorState) -> bool {
    if state.interaction.mode() == InteractionMode::Dragging {
        return false;
    }
    match state.selected_module_id.clone() {
        Some(id) => placement::remove_module(state, &id),
        None => false,
    }
}

/// Rotates the selected instance. Ignored while dragging.
pub fn rotate_selected(state: &mut ConfiguratorState) -> bool {
    if state.interaction.mode() == InteractionMode::Dragging {
        return false;
    }
    match state.selected_module_id.clone() {
        Some(id) => placement::rotate_module(state, &id),
        None => false,
    }
}

/// The ghost to draw for the current preview, if any.
#[must_use]
pub fn ghost(state: &ConfiguratorState, catalog: &Catalog) -> Option<Ghost> {
    let interaction = &state.interaction;
    let anchor = interaction.preview_position?;

    let (preset_id, footprint) = match interaction.mode() {
        InteractionMode::Idle => return None,
        InteractionMode::PresetArmed => {
            let preset = catalog.find_module(interaction.selected_preset_id.as_deref()?)?;
            (preset.id.clone(), preset.footprint)
        }
        InteractionMode::Dragging => {
            let module = state.find_module(interaction.dragging_instance_id.as_deref()?)?;
            (module.preset_id.clone(), module_footprint(module, catalog)?)
        }
    };

    Some(Ghost {
        preset_id,
        anchor,
        footprint,
        is_valid: interaction.is_valid_position,
    })
}

/// Whether the ghost would at least fit on the grid, ignoring other modules.
///
/// Renderers use this to tell "occupied" from "off the edge".
#[must_use]
pub fn ghost_in_bounds(state: &ConfiguratorState, ghost: &Ghost) -> bool {
    within_bounds(ghost.anchor.x, ghost.anchor.z, ghost.footprint, state.grid)
}
