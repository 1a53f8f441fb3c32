//! Catalog listing command.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::export::format_price;
use crate::models::ModuleCategory;
use clap::Args;

/// List module presets and starter layouts
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl CatalogArgs {
    /// Execute the catalog command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let catalog = ctx
            .config
            .catalog()
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;

        if self.json {
            return print_json(&catalog);
        }

        for category in ModuleCategory::all() {
            println!("{category}:");
            for preset in catalog.modules_in(*category) {
                println!(
                    "  {:<16} {:<16} {:<5} {:>10}",
                    preset.id,
                    preset.name,
                    preset.footprint.to_string(),
                    format_price(preset.base_price)
                );
            }
            println!();
        }

        println!("Starter layouts:");
        for starter in &catalog.starters {
            println!(
                "  {:<16} {:<16} {} module(s)",
                starter.id,
                starter.name,
                starter.modules.len()
            );
        }

        Ok(())
    }
}
