//! Image snapshot trigger.
//!
//! The core never captures pixels. It hands the rendering layer a
//! [`SnapshotRequest`] naming the file and the area to frame; the renderer
//! decides how to capture it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{APP_BINARY_NAME, CELL_SIZE_METERS};
use crate::models::ConfiguratorState;

/// Default image format requested from renderers.
pub const DEFAULT_SNAPSHOT_EXTENSION: &str = "png";

/// What the renderer should capture and where to save it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRequest {
    /// Suggested file name, including extension
    pub filename: String,
    /// Grid width in cells
    pub cells_x: u32,
    /// Grid depth in cells
    pub cells_z: u32,
    /// Grid width in meters
    pub width_meters: f64,
    /// Grid depth in meters
    pub depth_meters: f64,
    /// Request time
    pub requested_at: DateTime<Utc>,
}

impl SnapshotRequest {
    /// Builds a request framing the whole grid.
    #[must_use]
    pub fn new(state: &ConfiguratorState, requested_at: DateTime<Utc>) -> Self {
        Self::with_extension(state, requested_at, DEFAULT_SNAPSHOT_EXTENSION)
    }

    /// Builds a request for a specific file extension (e.g. `"txt"` for a
    /// terminal capture).
    #[must_use]
    pub fn with_extension(
        state: &ConfiguratorState,
        requested_at: DateTime<Utc>,
        extension: &str,
    ) -> Self {
        let grid = state.grid;
        Self {
            filename: format!(
                "{APP_BINARY_NAME}-{}.{extension}",
                requested_at.format("%Y%m%d-%H%M%S")
            ),
            cells_x: grid.cells_x,
            cells_z: grid.cells_z,
            width_meters: f64::from(grid.cells_x) * CELL_SIZE_METERS,
            depth_meters: f64::from(grid.cells_z) * CELL_SIZE_METERS,
            requested_at,
        }
    }
}
