//! CLI command handlers for Prefab Planner.
//!
//! This module provides headless, scriptable access to the configurator:
//! every subcommand opens the saved configuration, applies its change through
//! the store and lets the store persist the result.

pub mod apply;
pub mod catalog;
pub mod common;
pub mod config;
pub mod export;
pub mod grid;
pub mod module;
pub mod session;
pub mod starter;
pub mod summary;

// Re-export types used by main.rs and tests
pub use apply::ApplyArgs;
pub use catalog::CatalogArgs;
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::{ExportArgs, ExportFormat};
pub use grid::GridArgs;
pub use module::ModuleArgs;
pub use session::{ClearArgs, ResetArgs};
pub use starter::StarterArgs;
pub use summary::SummaryArgs;
