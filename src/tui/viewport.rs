//! Mapping between terminal coordinates and grid cells.
//!
//! Each grid cell is drawn [`CELL_WIDTH`] columns wide and one row tall. The
//! viewport may show only part of a large grid; `scroll` is the grid cell
//! drawn at the top-left corner of the area.

use ratatui::layout::Rect;

use crate::models::{GridCell, GridConfig};

/// Terminal columns per grid cell.
pub const CELL_WIDTH: u16 = 2;

/// The visible window onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridViewport {
    /// Screen area the cells are drawn into (inside any border)
    pub area: Rect,
    /// Top-left visible grid cell
    pub scroll: GridCell,
}

impl GridViewport {
    /// Creates a viewport showing the grid from its origin.
    #[must_use]
    pub const fn new(area: Rect) -> Self {
        Self {
            area,
            scroll: GridCell::new(0, 0),
        }
    }

    /// Number of whole cells that fit horizontally and vertically.
    #[must_use]
    pub const fn visible_cells(&self) -> (u16, u16) {
        (self.area.width / CELL_WIDTH, self.area.height)
    }

    /// Grid cell under a terminal position, or `None` outside the drawn grid.
    #[must_use]
    pub fn screen_point_to_grid_cell(
        &self,
        column: u16,
        row: u16,
        grid: GridConfig,
    ) -> Option<GridCell> {
        let (cols, rows) = self.visible_cells();
        if column < self.area.x || row < self.area.y {
            return None;
        }
        let dx = (column - self.area.x) / CELL_WIDTH;
        let dz = row - self.area.y;
        if dx >= cols || dz >= rows {
            return None;
        }
        let cell = self.scroll.offset(i32::from(dx), i32::from(dz));
        grid.contains(cell).then_some(cell)
    }

    /// Top-left terminal position of a grid cell, or `None` when scrolled out.
    #[must_use]
    pub fn grid_cell_to_screen(&self, cell: GridCell) -> Option<(u16, u16)> {
        let (cols, rows) = self.visible_cells();
        let dx = u16::try_from(cell.x - self.scroll.x).ok()?;
        let dz = u16::try_from(cell.z - self.scroll.z).ok()?;
        if dx >= cols || dz >= rows {
            return None;
        }
        Some((self.area.x + dx * CELL_WIDTH, self.area.y + dz))
    }

    /// Adjusts `scroll` so that `cell` is visible.
    pub fn scroll_to_include(&mut self, cell: GridCell) {
        let (cols, rows) = self.visible_cells();
        let cols = i32::from(cols.max(1));
        let rows = i32::from(rows.max(1));

        if cell.x < self.scroll.x {
            self.scroll.x = cell.x;
        } else if cell.x >= self.scroll.x + cols {
            self.scroll.x = cell.x - cols + 1;
        }
        if cell.z < self.scroll.z {
            self.scroll.z = cell.z;
        } else if cell.z >= self.scroll.z + rows {
            self.scroll.z = cell.z - rows + 1;
        }
        self.scroll.x = self.scroll.x.max(0);
        self.scroll.z = self.scroll.z.max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(x: u32, z: u32) -> GridConfig {
        GridConfig::new(x, z).unwrap()
    }

    #[test]
    fn test_default_viewport_starts_at_origin() {
        let viewport = GridViewport::default();
        assert_eq!(viewport.scroll, GridCell::default());
        assert_eq!(viewport.scroll, GridCell::new(0, 0));
        assert_eq!(viewport.visible_cells(), (0, 0));
        assert_eq!(viewport.screen_point_to_grid_cell(0, 0, grid(5, 5)), None);
    }

    #[test]
    fn test_screen_point_maps_two_columns_per_cell() {
        let viewport = GridViewport::new(Rect::new(10, 5, 40, 20));
        let g = grid(20, 20);

        assert_eq!(
            viewport.screen_point_to_grid_cell(10, 5, g),
            Some(GridCell::new(0, 0))
        );
        assert_eq!(
            viewport.screen_point_to_grid_cell(11, 5, g),
            Some(GridCell::new(0, 0))
        );
        assert_eq!(
            viewport.screen_point_to_grid_cell(12, 7, g),
            Some(GridCell::new(1, 2))
        );
    }

    #[test]
    fn test_screen_point_off_grid_is_none() {
        let viewport = GridViewport::new(Rect::new(10, 5, 40, 20));
        // Left of and above the area
        assert_eq!(viewport.screen_point_to_grid_cell(9, 5, grid(20, 20)), None);
        assert_eq!(viewport.screen_point_to_grid_cell(10, 4, grid(20, 20)), None);
        // Inside the area but beyond a small grid
        assert_eq!(viewport.screen_point_to_grid_cell(20, 5, grid(4, 4)), None);
        // Below the area
        assert_eq!(viewport.screen_point_to_grid_cell(10, 25, grid(40, 40)), None);
    }

    #[test]
    fn test_scroll_shifts_mapping() {
        let mut viewport = GridViewport::new(Rect::new(0, 0, 10, 4));
        viewport.scroll_to_include(GridCell::new(12, 9));
        assert_eq!(viewport.scroll, GridCell::new(8, 6));
        assert_eq!(
            viewport.screen_point_to_grid_cell(8, 3, grid(20, 20)),
            Some(GridCell::new(12, 9))
        );
        assert_eq!(viewport.grid_cell_to_screen(GridCell::new(12, 9)), Some((8, 3)));
        assert_eq!(viewport.grid_cell_to_screen(GridCell::new(0, 0)), None);

        viewport.scroll_to_include(GridCell::new(0, 0));
        assert_eq!(viewport.scroll, GridCell::new(0, 0));
    }
}
