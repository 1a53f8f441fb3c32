//! Occupied-cell index derived from the placed modules.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::models::{Footprint, GridCell, PlacedModule};

use super::geometry::{cells_covered, effective_footprint};

/// Set of cells covered by placed modules, with the owning instance per cell.
///
/// Derived state: rebuilt from the module list on every query and never
/// persisted. Where modules overlap (possible only after an unchecked
/// rotation) the first module in list order owns the cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupiedCellIndex {
    cells: HashMap<GridCell, String>,
}

impl OccupiedCellIndex {
    /// Whether the cell is covered by any indexed module.
    #[must_use]
    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Instance covering the cell, if any.
    #[must_use]
    pub fn owner(&self, cell: GridCell) -> Option<&str> {
        self.cells.get(&cell).map(String::as_str)
    }

    /// Whether any of the given cells is covered.
    pub fn intersects(&self, mut cells: impl Iterator<Item = GridCell>) -> bool {
        cells.any(|cell| self.contains(cell))
    }

    /// Number of covered cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over covered cells and their owners.
    pub fn iter(&self) -> impl Iterator<Item = (GridCell, &str)> {
        self.cells.iter().map(|(cell, id)| (*cell, id.as_str()))
    }
}

/// Effective (rotated) footprint of a placed module, or `None` when its preset
/// is missing from the catalog.
#[must_use]
pub fn module_footprint(module: &PlacedModule, catalog: &Catalog) -> Option<Footprint> {
    catalog
        .find_module(&module.preset_id)
        .map(|preset| effective_footprint(preset.footprint, module.rotation))
}

/// Unions the covered cells of every module except `exclude_instance_id`.
///
/// Modules whose preset cannot be resolved cover nothing.
pub fn build_occupied_index(
    modules: &[PlacedModule],
    catalog: &Catalog,
    exclude_instance_id: Option<&str>,
) -> OccupiedCellIndex {
    let mut index = OccupiedCellIndex::default();

    for module in modules {
        if exclude_instance_id == Some(module.instance_id.as_str()) {
            continue;
        }
        let Some(footprint) = module_footprint(module, catalog) else {
            continue;
        };
        for cell in cells_covered(module.grid_x, module.grid_z, footprint) {
            index
                .cells
                .entry(cell)
                .or_insert_with(|| module.instance_id.clone());
        }
    }

    index
}
