//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, grid defaults and storage keys.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Prefab Planner";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "prefab-planner";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "PrefabPlanner";

/// Default grid width in cells, used on first start and whenever a persisted
/// width is unusable.
pub const DEFAULT_GRID_CELLS_X: u32 = 20;

/// Default grid depth in cells.
pub const DEFAULT_GRID_CELLS_Z: u32 = 20;

/// Largest accepted grid dimension in cells, on either axis.
pub const MAX_GRID_CELLS: u32 = 200;

/// Edge length of one grid cell in meters.
pub const CELL_SIZE_METERS: f64 = 3.0;

/// Floor area covered by one grid cell in square meters.
pub const CELL_AREA_SQUARE_METERS: f64 = CELL_SIZE_METERS * CELL_SIZE_METERS;

/// Key under which the configurator's durable state is stored.
pub const STORAGE_KEY: &str = "configurator-storage";

/// Schema version written into persisted state.
pub const STORAGE_SCHEMA_VERSION: u32 = 1;

/// Schema version written into exported documents.
pub const EXPORT_DOCUMENT_VERSION: &str = "1.0";

/// Starter layout id of the empty configuration.
pub const EMPTY_STARTER_ID: &str = "vuoto";
