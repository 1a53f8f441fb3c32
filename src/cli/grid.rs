//! Grid inspection and resizing commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::constants::{CELL_SIZE_METERS, MAX_GRID_CELLS};
use crate::engine::placement::required_extent;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Show or resize the placement grid
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Grid subcommand
    #[command(subcommand)]
    pub command: GridCommand,
}

/// Grid subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum GridCommand {
    /// Show grid size and occupancy
    Show(GridShowArgs),
    /// Resize the grid
    Set(GridSetArgs),
}

/// Show grid size and occupancy
#[derive(Debug, Clone, Args)]
pub struct GridShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resize the grid
#[derive(Debug, Clone, Args)]
pub struct GridSetArgs {
    /// Width in cells
    #[arg(value_name = "CELLS_X")]
    pub cells_x: u32,

    /// Depth in cells
    #[arg(value_name = "CELLS_Z")]
    pub cells_z: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridOutput {
    cells_x: u32,
    cells_z: u32,
    cell_size_meters: f64,
    occupied_cells: usize,
    total_cells: u64,
    min_cells_x: i64,
    min_cells_z: i64,
}

impl GridArgs {
    /// Execute the grid command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            GridCommand::Show(args) => args.execute(ctx),
            GridCommand::Set(args) => args.execute(ctx),
        }
    }
}

impl GridShowArgs {
    fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let grid = store.state().grid;
        let (min_cells_x, min_cells_z) =
            required_extent(store.state(), store.catalog()).unwrap_or((0, 0));
        let output = GridOutput {
            cells_x: grid.cells_x,
            cells_z: grid.cells_z,
            cell_size_meters: CELL_SIZE_METERS,
            occupied_cells: store.occupied_index().len(),
            total_cells: grid.cell_count(),
            min_cells_x,
            min_cells_z,
        };

        if self.json {
            return print_json(&output);
        }

        println!("Grid: {grid} cells ({CELL_SIZE_METERS} m per cell)");
        println!(
            "Occupied: {} of {} cells",
            output.occupied_cells, output.total_cells
        );
        if min_cells_x > 0 {
            println!("Smallest grid holding all modules: {min_cells_x}x{min_cells_z}");
        }
        Ok(())
    }
}

impl GridSetArgs {
    fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if self.cells_x == 0 || self.cells_z == 0 {
            return Err(CliError::validation("Grid dimensions must be at least 1"));
        }
        if self.cells_x > MAX_GRID_CELLS || self.cells_z > MAX_GRID_CELLS {
            return Err(CliError::validation(format!(
                "Grid dimensions must not exceed {MAX_GRID_CELLS}"
            )));
        }

        let mut store = ctx.open_store()?;
        if !store.set_grid_size(self.cells_x, self.cells_z) {
            let (need_x, need_z) =
                required_extent(store.state(), store.catalog()).unwrap_or((0, 0));
            return Err(CliError::validation(format!(
                "Cannot shrink the grid to {}x{}: placed modules need at least {need_x}x{need_z}",
                self.cells_x, self.cells_z
            )));
        }
        println!("Grid resized to {}x{}", self.cells_x, self.cells_z);
        Ok(())
    }
}
