//! Data models for the configurator: presets, placed modules, grid and state.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod grid;
pub mod interaction;
pub mod module_preset;
pub mod placed_module;
pub mod state;

// Re-export all model types
pub use grid::{GridCell, GridConfig};
pub use interaction::{InteractionMode, InteractionState};
pub use module_preset::{Footprint, ModuleCategory, ModulePreset};
pub use placed_module::{generate_instance_id, PlacedModule, Rotation};
pub use state::ConfiguratorState;
