//! Repair of persisted state.
//!
//! Persisted JSON may come from an older build, a hand edit or a torn write.
//! [`validate_and_repair`] turns any JSON value into a state that satisfies
//! the grid invariants, repairing field by field instead of failing.
//!
//! # Rules
//!
//! - Both the wrapped form `{ "version": 1, "state": {...} }` and a bare state
//!   object are accepted; anything else yields the defaults
//! - `gridCellsX` / `gridCellsZ` must be integers in `1..=MAX_GRID_CELLS`,
//!   otherwise the default dimension is used
//! - A `placedModules` value that is not an array becomes empty
//! - Module entries are dropped one by one when they are malformed or reuse
//!   an earlier instance id
//! - Modules that overlap or leave the grid are kept as saved, since an
//!   unchecked rotation or a starter layout can produce them; they are
//!   logged and left to [`find_conflicts`]
//! - Entries naming a preset missing from the catalog are kept

use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use crate::catalog::Catalog;
use crate::constants::{DEFAULT_GRID_CELLS_X, DEFAULT_GRID_CELLS_Z, MAX_GRID_CELLS};
use crate::engine::placement::find_conflicts;
use crate::models::{ConfiguratorState, GridConfig, PlacedModule};

use super::DurableState;

/// Repairs raw persisted JSON into a safe durable state. Never fails.
#[must_use]
pub fn validate_and_repair(raw: &Value, catalog: &Catalog) -> DurableState {
    let Some(object) = unwrap_envelope(raw) else {
        warn!("Persisted state is not an object; using defaults");
        return DurableState::default();
    };

    let grid_cells_x = repair_dimension(object.get("gridCellsX"), DEFAULT_GRID_CELLS_X, "gridCellsX");
    let grid_cells_z = repair_dimension(object.get("gridCellsZ"), DEFAULT_GRID_CELLS_Z, "gridCellsZ");
    let grid = GridConfig {
        cells_x: grid_cells_x,
        cells_z: grid_cells_z,
    };

    let placed_modules = match object.get("placedModules") {
        Some(Value::Array(entries)) => repair_modules(entries, grid, catalog),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            warn!("Persisted placedModules is not an array; starting empty");
            Vec::new()
        }
    };

    DurableState {
        grid_cells_x,
        grid_cells_z,
        placed_modules,
    }
}

fn unwrap_envelope(raw: &Value) -> Option<&serde_json::Map<String, Value>> {
    let object = raw.as_object()?;
    match object.get("state") {
        Some(Value::Object(inner)) => Some(inner),
        _ => Some(object),
    }
}

fn repair_dimension(value: Option<&Value>, default: u32, field: &str) -> u32 {
    let repaired = value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| (1..=MAX_GRID_CELLS).contains(n));

    repaired.unwrap_or_else(|| {
        if value.is_some() {
            warn!(field, ?value, default, "Invalid persisted grid dimension; using default");
        }
        default
    })
}

fn repair_modules(entries: &[Value], grid: GridConfig, catalog: &Catalog) -> Vec<PlacedModule> {
    let mut kept: Vec<PlacedModule> = Vec::with_capacity(entries.len());
    let mut seen_ids = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let module: PlacedModule = match serde_json::from_value(entry.clone()) {
            Ok(module) => module,
            Err(err) => {
                warn!(index, %err, "Dropping malformed persisted module");
                continue;
            }
        };

        if module.instance_id.is_empty() || module.preset_id.is_empty() {
            warn!(index, "Dropping persisted module with an empty id");
            continue;
        }
        if !seen_ids.insert(module.instance_id.clone()) {
            warn!(index, instance_id = %module.instance_id, "Dropping duplicate persisted module");
            continue;
        }

        kept.push(module);
    }

    let mut restored = ConfiguratorState::new(grid);
    restored.placed_modules = kept;
    for instance_id in find_conflicts(&restored, catalog) {
        warn!(%instance_id, "Persisted module overlaps or leaves the grid; keeping it");
    }

    restored.placed_modules
}
