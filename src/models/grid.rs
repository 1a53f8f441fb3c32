//! Grid lattice dimensions and cell addressing.

use crate::constants::{DEFAULT_GRID_CELLS_X, DEFAULT_GRID_CELLS_Z, MAX_GRID_CELLS};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of one cell of the grid lattice.
///
/// Coordinates are signed so that raw input coming from a pointer adapter can
/// be represented and rejected by bounds checks instead of wrapping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCell {
    /// Column (X axis)
    pub x: i32,
    /// Row (Z axis)
    pub z: i32,
}

impl GridCell {
    /// Creates a new cell address.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the cell shifted by the given deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            z: self.z.saturating_add(dz),
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Bounds of the placement lattice: `[0, cells_x) × [0, cells_z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Width in cells
    pub cells_x: u32,
    /// Depth in cells
    pub cells_z: u32,
}

impl GridConfig {
    /// Creates a grid with validation.
    ///
    /// # Validation
    ///
    /// - Both dimensions must be positive
    /// - Neither dimension may exceed [`MAX_GRID_CELLS`]
    pub fn new(cells_x: u32, cells_z: u32) -> Result<Self> {
        if cells_x == 0 || cells_z == 0 {
            anyhow::bail!("Grid dimensions must be positive (got {cells_x}x{cells_z})");
        }
        if cells_x > MAX_GRID_CELLS || cells_z > MAX_GRID_CELLS {
            anyhow::bail!(
                "Grid dimensions cannot exceed {MAX_GRID_CELLS} cells (got {cells_x}x{cells_z})"
            );
        }
        Ok(Self { cells_x, cells_z })
    }

    /// Total number of cells in the lattice.
    #[must_use]
    pub const fn cell_count(self) -> u64 {
        self.cells_x as u64 * self.cells_z as u64
    }

    /// Whether a single cell lies inside the lattice.
    #[must_use]
    pub fn contains(self, cell: GridCell) -> bool {
        cell.x >= 0
            && cell.z >= 0
            && i64::from(cell.x) < i64::from(self.cells_x)
            && i64::from(cell.z) < i64::from(self.cells_z)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cells_x: DEFAULT_GRID_CELLS_X,
            cells_z: DEFAULT_GRID_CELLS_Z,
        }
    }
}

impl fmt::Display for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cells_x, self.cells_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new_rejects_zero() {
        assert!(GridConfig::new(0, 10).is_err());
        assert!(GridConfig::new(10, 0).is_err());
        assert!(GridConfig::new(MAX_GRID_CELLS + 1, 10).is_err());
        assert!(GridConfig::new(MAX_GRID_CELLS, MAX_GRID_CELLS).is_ok());
        assert_eq!(GridConfig::new(10, 8).unwrap().cell_count(), 80);
    }

    #[test]
    fn test_grid_contains() {
        let grid = GridConfig::new(10, 10).unwrap();
        assert!(grid.contains(GridCell::new(0, 0)));
        assert!(grid.contains(GridCell::new(9, 9)));
        assert!(!grid.contains(GridCell::new(10, 0)));
        assert!(!grid.contains(GridCell::new(-1, 3)));
    }

    #[test]
    fn test_cell_offset_saturates() {
        let cell = GridCell::new(i32::MAX, 0).offset(1, -1);
        assert_eq!(cell, GridCell::new(i32::MAX, -1));
    }
}
