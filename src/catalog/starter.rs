//! Starter layouts: pre-authored arrangements of catalog modules.

use crate::engine::geometry::{cells_covered, within_bounds};
use crate::models::{GridCell, GridConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Catalog;

/// One module of a starter layout at a fixed anchor (always unrotated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterPlacement {
    /// Catalog preset to instantiate
    pub preset_id: String,
    /// Anchor column
    pub grid_x: i32,
    /// Anchor row
    pub grid_z: i32,
}

impl StarterPlacement {
    /// Creates a placement.
    pub fn new(preset_id: impl Into<String>, grid_x: i32, grid_z: i32) -> Self {
        Self {
            preset_id: preset_id.into(),
            grid_x,
            grid_z,
        }
    }
}

/// Named arrangement used to initialise a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterLayout {
    /// Unique identifier (e.g., "bilocale")
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Modules to insert; may be empty
    #[serde(default)]
    pub modules: Vec<StarterPlacement>,
}

impl StarterLayout {
    /// Creates a starter layout.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        modules: Vec<StarterPlacement>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            modules,
        }
    }

    /// Whether the layout inserts nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Checks a starter layout for authoring mistakes on the given grid.
///
/// Returns one message per problem: unknown presets, placements outside the
/// grid and placements overlapping an earlier placement. An empty result means
/// the layout can be bulk-inserted without breaking placement invariants.
pub fn starter_problems(starter: &StarterLayout, catalog: &Catalog, grid: GridConfig) -> Vec<String> {
    let mut problems = Vec::new();
    let mut claimed: HashMap<GridCell, usize> = HashMap::new();

    for (index, placement) in starter.modules.iter().enumerate() {
        let Some(preset) = catalog.find_module(&placement.preset_id) else {
            problems.push(format!(
                "starter '{}' entry {}: unknown preset '{}'",
                starter.id, index, placement.preset_id
            ));
            continue;
        };

        if !within_bounds(placement.grid_x, placement.grid_z, preset.footprint, grid) {
            problems.push(format!(
                "starter '{}' entry {}: '{}' at ({}, {}) exceeds the {} grid",
                starter.id, index, placement.preset_id, placement.grid_x, placement.grid_z, grid
            ));
            continue;
        }

        for cell in cells_covered(placement.grid_x, placement.grid_z, preset.footprint) {
            if let Some(other) = claimed.insert(cell, index) {
                problems.push(format!(
                    "starter '{}' entry {}: '{}' overlaps entry {} at {}",
                    starter.id, index, placement.preset_id, other, cell
                ));
                break;
            }
        }
    }

    problems
}
