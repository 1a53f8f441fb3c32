//! Commands clearing the saved configuration.

use crate::cli::common::{CliContext, CliResult};
use clap::Args;

/// Remove every placed module, keeping the grid
#[derive(Debug, Clone, Args)]
pub struct ClearArgs {}

impl ClearArgs {
    /// Execute the clear command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let removed = store.module_count();
        store.clear_all();
        println!("Removed {removed} module(s)");
        Ok(())
    }
}

/// Forget everything: modules, grid size and the saved state
#[derive(Debug, Clone, Args)]
pub struct ResetArgs {}

impl ResetArgs {
    /// Execute the reset command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        store.hard_reset();
        println!(
            "Configuration reset (grid {}, saved state removed)",
            store.state().grid
        );
        Ok(())
    }
}
