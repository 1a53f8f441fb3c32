//! Batch command application from a JSON script.
//!
//! The script is a JSON array of commands in the same tagged form the web
//! API accepts:
//!
//! ```json
//! [
//!   { "type": "addModule", "presetId": "living-3x2", "gridX": 0, "gridZ": 0 },
//!   { "type": "setGridSize", "cellsX": 12, "cellsZ": 12 }
//! ]
//! ```

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::store::{Command, CommandOutcome};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Apply a JSON script of commands
#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Path to a JSON array of commands
    #[arg(short, long, value_name = "FILE")]
    pub script: PathBuf,

    /// Fail (exit code 1) if any command is rejected
    #[arg(long)]
    pub strict: bool,

    /// Output per-command outcomes as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyReport {
    outcomes: Vec<CommandOutcome>,
    rejected: usize,
    module_count: usize,
}

impl ApplyArgs {
    /// Execute the apply command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let content = fs::read_to_string(&self.script).map_err(|e| {
            CliError::io(format!(
                "Failed to read script {}: {e}",
                self.script.display()
            ))
        })?;
        let commands: Vec<Command> = serde_json::from_str(&content)
            .map_err(|e| CliError::validation(format!("Invalid command script: {e}")))?;

        let mut store = ctx.open_store()?;
        let names: Vec<&'static str> = commands.iter().map(Command::name).collect();
        let outcomes = store.dispatch_all(commands);
        let rejected = outcomes.iter().filter(|o| !o.is_applied()).count();

        let total = outcomes.len();
        if self.json {
            print_json(&ApplyReport {
                outcomes,
                rejected,
                module_count: store.module_count(),
            })?;
        } else {
            for (index, (name, outcome)) in names.iter().zip(&outcomes).enumerate() {
                let mark = if outcome.is_applied() { "ok" } else { "rejected" };
                println!("{:>3}. {name:<18} {mark}", index + 1);
            }
            println!(
                "Applied {} of {total} command(s); {} module(s) placed",
                total - rejected,
                store.module_count()
            );
        }

        if self.strict && rejected > 0 {
            return Err(CliError::validation(format!(
                "{rejected} command(s) were rejected"
            )));
        }
        Ok(())
    }
}
