//! Pure grid geometry: rotation, covered cells and bounds.
//!
//! None of these functions touch configurator state; they are the building
//! blocks the placement engine and the renderers share.

use crate::models::{Footprint, GridCell, GridConfig, Rotation};

/// Footprint after applying a rotation (axes swapped for 90° and 270°).
#[must_use]
pub const fn effective_footprint(footprint: Footprint, rotation: Rotation) -> Footprint {
    if rotation.swaps_axes() {
        footprint.swapped()
    } else {
        footprint
    }
}

/// Enumerates every cell of `[grid_x, grid_x + cells_x) × [grid_z, grid_z + cells_z)`.
///
/// Cells are yielded row by row (Z outer, X inner).
pub fn cells_covered(
    grid_x: i32,
    grid_z: i32,
    footprint: Footprint,
) -> impl Iterator<Item = GridCell> {
    let width = axis_len(footprint.cells_x);
    let depth = axis_len(footprint.cells_z);
    (0..depth).flat_map(move |dz| (0..width).map(move |dx| GridCell::new(grid_x, grid_z).offset(dx, dz)))
}

/// True iff the footprint anchored at `(grid_x, grid_z)` lies fully inside the grid.
#[must_use]
pub fn within_bounds(grid_x: i32, grid_z: i32, footprint: Footprint, grid: GridConfig) -> bool {
    grid_x >= 0
        && grid_z >= 0
        && i64::from(grid_x) + i64::from(footprint.cells_x) <= i64::from(grid.cells_x)
        && i64::from(grid_z) + i64::from(footprint.cells_z) <= i64::from(grid.cells_z)
}

fn axis_len(cells: u32) -> i32 {
    i32::try_from(cells).unwrap_or(i32::MAX)
}
