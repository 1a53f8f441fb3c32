//! Live interaction state (armed preset, drag, ghost preview).

use crate::models::GridCell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named interaction modes derived from [`InteractionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    /// Nothing armed, nothing dragged
    Idle,
    /// A catalog preset is waiting for a target cell
    PresetArmed,
    /// A placed instance is being relocated
    Dragging,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::PresetArmed => "placing",
            Self::Dragging => "dragging",
        };
        f.write_str(label)
    }
}

/// Transient interaction state. Never persisted.
///
/// # Invariants
///
/// - `selected_preset_id` and `dragging_instance_id` are never both set
/// - `drag_origin` is set exactly when `dragging_instance_id` is set
/// - `is_valid_position` is `false` whenever `preview_position` is `None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionState {
    /// Preset armed for placement
    pub selected_preset_id: Option<String>,
    /// Instance currently being dragged
    pub dragging_instance_id: Option<String>,
    /// Anchor of the dragged instance when the drag started
    pub drag_origin: Option<GridCell>,
    /// Candidate anchor under the pointer
    pub preview_position: Option<GridCell>,
    /// Whether the candidate anchor is a legal placement
    pub is_valid_position: bool,
}

impl InteractionState {
    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> InteractionMode {
        if self.dragging_instance_id.is_some() {
            InteractionMode::Dragging
        } else if self.selected_preset_id.is_some() {
            InteractionMode::PresetArmed
        } else {
            InteractionMode::Idle
        }
    }

    /// Drops the preview and its validity flag.
    pub fn clear_preview(&mut self) {
        self.preview_position = None;
        self.is_valid_position = false;
    }

    /// Ends any drag without touching the armed preset.
    pub fn clear_drag(&mut self) {
        self.dragging_instance_id = None;
        self.drag_origin = None;
    }

    /// Returns to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
