//! Module placement commands.
//!
//! Each invocation opens the saved configuration, applies one command and
//! lets the store persist the result.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::engine::{build_occupied_index, cells_covered, effective_footprint, within_bounds};
use crate::models::{Footprint, GridCell, PlacedModule};
use crate::store::ConfiguratorStore;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Place, move, rotate and remove modules
#[derive(Debug, Clone, Args)]
pub struct ModuleArgs {
    /// Module subcommand
    #[command(subcommand)]
    pub command: ModuleCommand,
}

/// Module subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ModuleCommand {
    /// Place a new module
    Add(AddModuleArgs),
    /// Move a placed module (rotation is kept)
    Move(MoveModuleArgs),
    /// Rotate a placed module by 90°
    Rotate(InstanceArgs),
    /// Remove a placed module
    Remove(InstanceArgs),
    /// Select a placed module
    Select(InstanceArgs),
    /// List placed modules
    List(ListModulesArgs),
}

/// Place a new module
#[derive(Debug, Clone, Args)]
pub struct AddModuleArgs {
    /// Catalog preset ID
    #[arg(value_name = "PRESET")]
    pub preset: String,

    /// Anchor column
    #[arg(value_name = "X", allow_negative_numbers = true)]
    pub x: i32,

    /// Anchor row
    #[arg(value_name = "Z", allow_negative_numbers = true)]
    pub z: i32,
}

/// Move a placed module
#[derive(Debug, Clone, Args)]
pub struct MoveModuleArgs {
    /// Instance ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New anchor column
    #[arg(value_name = "X", allow_negative_numbers = true)]
    pub x: i32,

    /// New anchor row
    #[arg(value_name = "Z", allow_negative_numbers = true)]
    pub z: i32,
}

/// Target a placed module
#[derive(Debug, Clone, Args)]
pub struct InstanceArgs {
    /// Instance ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// List placed modules
#[derive(Debug, Clone, Args)]
pub struct ListModulesArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModuleItem {
    instance_id: String,
    preset_id: String,
    name: Option<String>,
    grid_x: i32,
    grid_z: i32,
    rotation: u16,
    footprint: Option<Footprint>,
    selected: bool,
    conflict: bool,
}

#[derive(Debug, Serialize)]
struct ListModulesResponse {
    modules: Vec<ModuleItem>,
    count: usize,
}

impl ModuleArgs {
    /// Execute the module command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        match &self.command {
            ModuleCommand::Add(args) => args.execute(&mut store),
            ModuleCommand::Move(args) => args.execute(&mut store),
            ModuleCommand::Rotate(args) => {
                require_instance(&store, &args.id)?;
                store.rotate_module(&args.id);
                let rotation = store
                    .state()
                    .find_module(&args.id)
                    .map(|m| m.rotation)
                    .unwrap_or_default();
                println!("Rotated {} to {rotation}", args.id);
                if store.conflicts().contains(&args.id) {
                    println!("Warning: module now overlaps a neighbour or leaves the grid");
                }
                Ok(())
            }
            ModuleCommand::Remove(args) => {
                require_instance(&store, &args.id)?;
                store.remove_module(&args.id);
                println!("Removed {}", args.id);
                Ok(())
            }
            ModuleCommand::Select(args) => {
                require_instance(&store, &args.id)?;
                store.select_module(Some(&args.id));
                println!("Selected {}", args.id);
                Ok(())
            }
            ModuleCommand::List(args) => args.execute(&store),
        }
    }
}

impl AddModuleArgs {
    fn execute(&self, store: &mut ConfiguratorStore) -> CliResult<()> {
        let Some(id) = store.add_module(&self.preset, self.x, self.z) else {
            return Err(CliError::validation(explain_rejection(
                store,
                &self.preset,
                None,
                self.x,
                self.z,
            )));
        };
        println!("Added {} at ({}, {}) as {id}", self.preset, self.x, self.z);
        Ok(())
    }
}

impl MoveModuleArgs {
    fn execute(&self, store: &mut ConfiguratorStore) -> CliResult<()> {
        let module = require_instance(store, &self.id)?.clone();
        if module.anchor() == GridCell::new(self.x, self.z) {
            println!("{} is already at ({}, {})", self.id, self.x, self.z);
            return Ok(());
        }
        if !store.move_module(&self.id, self.x, self.z) {
            return Err(CliError::validation(explain_rejection(
                store,
                &module.preset_id,
                Some(&module.instance_id),
                self.x,
                self.z,
            )));
        }
        println!("Moved {} to ({}, {})", self.id, self.x, self.z);
        Ok(())
    }
}

impl ListModulesArgs {
    fn execute(&self, store: &ConfiguratorStore) -> CliResult<()> {
        let state = store.state();
        let catalog = store.catalog();
        let conflicts = store.conflicts();

        let modules: Vec<ModuleItem> = state
            .placed_modules
            .iter()
            .map(|m| {
                let preset = catalog.find_module(&m.preset_id);
                ModuleItem {
                    instance_id: m.instance_id.clone(),
                    preset_id: m.preset_id.clone(),
                    name: preset.map(|p| p.name.clone()),
                    grid_x: m.grid_x,
                    grid_z: m.grid_z,
                    rotation: m.rotation.degrees(),
                    footprint: preset.map(|p| effective_footprint(p.footprint, m.rotation)),
                    selected: state.selected_module_id.as_deref() == Some(m.instance_id.as_str()),
                    conflict: conflicts.contains(&m.instance_id),
                }
            })
            .collect();
        let response = ListModulesResponse {
            count: modules.len(),
            modules,
        };

        if self.json {
            return print_json(&response);
        }
        if response.count == 0 {
            println!("No modules placed.");
            return Ok(());
        }

        println!("Modules ({}):", response.count);
        println!();
        for item in &response.modules {
            let marker = if item.selected { '*' } else { ' ' };
            let name = item.name.as_deref().unwrap_or("(unknown preset)");
            let size = item
                .footprint
                .map_or_else(|| "-".to_string(), |f| f.to_string());
            println!(
                "{marker} {:<36} {:<16} {:<5} ({}, {}) {:>3}°{}",
                item.instance_id,
                name,
                size,
                item.grid_x,
                item.grid_z,
                item.rotation,
                if item.conflict { "  [conflict]" } else { "" }
            );
        }
        Ok(())
    }
}

fn require_instance<'a>(
    store: &'a ConfiguratorStore,
    id: &str,
) -> CliResult<&'a PlacedModule> {
    store
        .state()
        .find_module(id)
        .ok_or_else(|| CliError::validation(format!("Module '{id}' not found")))
}

/// Describes why a placement or move was rejected.
fn explain_rejection(
    store: &ConfiguratorStore,
    preset_id: &str,
    exclude: Option<&str>,
    x: i32,
    z: i32,
) -> String {
    let catalog = store.catalog();
    let state = store.state();
    let Some(preset) = catalog.find_module(preset_id) else {
        return format!("Unknown module preset '{preset_id}'");
    };

    let footprint = exclude
        .and_then(|id| state.find_module(id))
        .map_or(preset.footprint, |m| effective_footprint(preset.footprint, m.rotation));

    if !within_bounds(x, z, footprint, state.grid) {
        return format!(
            "A {footprint} module at ({x}, {z}) does not fit the {} grid",
            state.grid
        );
    }

    let index = build_occupied_index(&state.placed_modules, catalog, exclude);
    let blocker = cells_covered(x, z, footprint).find_map(|cell| index.owner(cell));
    match blocker {
        Some(owner) => format!("Position ({x}, {z}) overlaps module {owner}"),
        None => format!("Cannot place '{preset_id}' at ({x}, {z})"),
    }
}
