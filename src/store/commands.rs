//! Command surface of the configurator store.

use serde::{Deserialize, Serialize};

use crate::engine::DragOutcome;
use crate::models::GridCell;

/// One state transition request.
///
/// Serialized with a `type` tag, e.g.
/// `{ "type": "addModule", "presetId": "kitchen-2x2", "gridX": 0, "gridZ": 0 }`.
/// Scripts (`prefab-planner apply`) and the web API send these directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Place a new unrotated instance
    #[serde(rename_all = "camelCase")]
    AddModule {
        /// Catalog preset
        preset_id: String,
        /// Anchor column
        grid_x: i32,
        /// Anchor row
        grid_z: i32,
    },
    /// Move an instance, keeping its rotation
    #[serde(rename_all = "camelCase")]
    MoveModule {
        /// Instance to move
        instance_id: String,
        /// New anchor column
        grid_x: i32,
        /// New anchor row
        grid_z: i32,
    },
    /// Rotate an instance by 90° (not re-validated)
    #[serde(rename_all = "camelCase")]
    RotateModule {
        /// Instance to rotate
        instance_id: String,
    },
    /// Remove an instance
    #[serde(rename_all = "camelCase")]
    RemoveModule {
        /// Instance to remove
        instance_id: String,
    },
    /// Highlight an instance, or clear the highlight
    #[serde(rename_all = "camelCase")]
    SelectModule {
        /// Instance to select
        #[serde(default)]
        instance_id: Option<String>,
    },
    /// Arm a preset for placement, or disarm
    #[serde(rename_all = "camelCase")]
    SetSelectedPreset {
        /// Preset to arm
        #[serde(default)]
        preset_id: Option<String>,
    },
    /// Pick up an instance
    #[serde(rename_all = "camelCase")]
    StartDrag {
        /// Instance to drag
        instance_id: String,
    },
    /// Pointer moved to a cell (`None` when off the grid)
    UpdatePreview {
        /// Cell under the pointer
        #[serde(default)]
        cell: Option<GridCell>,
    },
    /// Drop the ghost preview
    ClearPreview,
    /// Place the armed preset at the preview cell
    CommitPreview,
    /// Release the dragged instance
    StopDrag,
    /// Remove the selected instance
    DeleteSelected,
    /// Rotate the selected instance
    RotateSelected,
    /// Replace all modules with a starter layout
    #[serde(rename_all = "camelCase")]
    LoadPreset {
        /// Starter layout id
        starter_id: String,
    },
    /// Remove every module
    ClearAll,
    /// Clear, restore the default grid and purge storage
    HardReset,
    /// Resize the grid
    #[serde(rename_all = "camelCase")]
    SetGridSize {
        /// New width
        cells_x: u32,
        /// New depth
        cells_z: u32,
    },
    /// Ask the renderer to recenter its view
    ResetView,
}

impl Command {
    /// Stable command name, as used in the serialized `type` tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddModule { .. } => "addModule",
            Self::MoveModule { .. } => "moveModule",
            Self::RotateModule { .. } => "rotateModule",
            Self::RemoveModule { .. } => "removeModule",
            Self::SelectModule { .. } => "selectModule",
            Self::SetSelectedPreset { .. } => "setSelectedPreset",
            Self::StartDrag { .. } => "startDrag",
            Self::UpdatePreview { .. } => "updatePreview",
            Self::ClearPreview => "clearPreview",
            Self::CommitPreview => "commitPreview",
            Self::StopDrag => "stopDrag",
            Self::DeleteSelected => "deleteSelected",
            Self::RotateSelected => "rotateSelected",
            Self::LoadPreset { .. } => "loadPreset",
            Self::ClearAll => "clearAll",
            Self::HardReset => "hardReset",
            Self::SetGridSize { .. } => "setGridSize",
            Self::ResetView => "resetView",
        }
    }

    /// Whether applying this command can change the persisted subset.
    #[must_use]
    pub const fn touches_durable_state(&self) -> bool {
        !matches!(
            self,
            Self::SelectModule { .. }
                | Self::SetSelectedPreset { .. }
                | Self::StartDrag { .. }
                | Self::UpdatePreview { .. }
                | Self::ClearPreview
                | Self::ResetView
        )
    }
}

/// Result of dispatching a [`Command`].
///
/// Invalid requests are not errors: they come back as `Rejected` and leave
/// the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CommandOutcome {
    /// The state changed
    Applied,
    /// A new instance was placed
    #[serde(rename_all = "camelCase")]
    Created {
        /// Id of the new instance
        instance_id: String,
    },
    /// A drag ended
    Released {
        /// Whether the instance moved or snapped back
        drag: DragOutcome,
    },
    /// The command was a no-op
    Rejected,
}

impl CommandOutcome {
    /// Whether the command changed the state.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected)
    }

    /// Id of the instance created by the command, if any.
    #[must_use]
    pub fn created_id(&self) -> Option<&str> {
        match self {
            Self::Created { instance_id } => Some(instance_id),
            _ => None,
        }
    }

    pub(crate) const fn from_flag(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_wire_format() {
        let command = Command::AddModule {
            preset_id: "kitchen-2x2".to_string(),
            grid_x: 1,
            grid_z: 2,
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(
            value,
            json!({ "type": "addModule", "presetId": "kitchen-2x2", "gridX": 1, "gridZ": 2 })
        );
        assert_eq!(value["type"], command.name());
    }

    #[test]
    fn test_command_parses_optional_fields() {
        let parsed: Vec<Command> = serde_json::from_value(json!([
            { "type": "setSelectedPreset" },
            { "type": "updatePreview", "cell": { "x": 3, "z": 4 } },
            { "type": "updatePreview", "cell": null },
            { "type": "setGridSize", "cellsX": 12, "cellsZ": 8 },
            { "type": "hardReset" }
        ]))
        .unwrap();

        assert_eq!(parsed[0], Command::SetSelectedPreset { preset_id: None });
        assert_eq!(
            parsed[1],
            Command::UpdatePreview {
                cell: Some(GridCell::new(3, 4))
            }
        );
        assert_eq!(parsed[2], Command::UpdatePreview { cell: None });
        assert_eq!(
            parsed[3],
            Command::SetGridSize {
                cells_x: 12,
                cells_z: 8
            }
        );
        assert_eq!(parsed[4], Command::HardReset);
    }

    #[test]
    fn test_unknown_command_is_error() {
        assert!(serde_json::from_value::<Command>(json!({ "type": "explode" })).is_err());
    }

    #[test]
    fn test_outcome_wire_format() {
        let outcome = CommandOutcome::Created {
            instance_id: "abc".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "status": "created", "instanceId": "abc" })
        );
        assert_eq!(outcome.created_id(), Some("abc"));
        assert!(!CommandOutcome::Rejected.is_applied());
    }
}
