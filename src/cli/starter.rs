//! Starter layout command.

use crate::cli::common::{CliContext, CliError, CliResult};
use clap::Args;

/// Replace the configuration with a starter layout
#[derive(Debug, Clone, Args)]
pub struct StarterArgs {
    /// Starter layout ID (see `catalog`)
    #[arg(value_name = "ID")]
    pub id: String,
}

impl StarterArgs {
    /// Execute the starter command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let Some(starter) = store.catalog().find_starter(&self.id) else {
            return Err(CliError::validation(format!(
                "Unknown starter layout '{}'",
                self.id
            )));
        };
        let name = starter.name.clone();

        store.load_preset(&self.id);

        let conflicts = store.conflicts();
        println!(
            "Loaded starter '{name}' ({} module(s))",
            store.module_count()
        );
        if !conflicts.is_empty() {
            println!(
                "Warning: {} module(s) do not fit the current grid",
                conflicts.len()
            );
        }
        Ok(())
    }
}
