//! Placement validation and mutation.
//!
//! Every function here takes the state it works on explicitly; nothing is
//! cached between calls. Mutating functions are no-ops when the request would
//! break the no-overlap or in-bounds invariants, and report whether they
//! changed anything instead of returning errors.
//!
//! # Rotation
//!
//! [`rotate_module`] does **not** re-validate: a rotated module may overlap a
//! neighbour or leave the grid. Adding and moving are always validated.
//! Modules left in such a state are reported by [`find_conflicts`].

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{ConfiguratorState, Footprint, GridCell, PlacedModule};

use super::geometry::{cells_covered, within_bounds};
use super::occupancy::{build_occupied_index, module_footprint};

/// Whether `footprint` anchored at `(grid_x, grid_z)` is in bounds and free,
/// ignoring `exclude_instance_id`.
pub fn footprint_fits(
    state: &ConfiguratorState,
    catalog: &Catalog,
    footprint: Footprint,
    grid_x: i32,
    grid_z: i32,
    exclude_instance_id: Option<&str>,
) -> bool {
    if !within_bounds(grid_x, grid_z, footprint, state.grid) {
        return false;
    }
    let index = build_occupied_index(&state.placed_modules, catalog, exclude_instance_id);
    !index.intersects(cells_covered(grid_x, grid_z, footprint))
}

/// Whether a new, unrotated instance of `preset_id` fits at `(grid_x, grid_z)`.
///
/// Returns `false` for unknown presets.
pub fn can_place(
    state: &ConfiguratorState,
    catalog: &Catalog,
    preset_id: &str,
    grid_x: i32,
    grid_z: i32,
    exclude_instance_id: Option<&str>,
) -> bool {
    catalog.find_module(preset_id).is_some_and(|preset| {
        footprint_fits(
            state,
            catalog,
            preset.footprint,
            grid_x,
            grid_z,
            exclude_instance_id,
        )
    })
}

/// Whether an existing instance, keeping its rotation, fits at `(grid_x, grid_z)`.
///
/// The instance's own cells are excluded from the collision check.
pub fn can_move(
    state: &ConfiguratorState,
    catalog: &Catalog,
    instance_id: &str,
    grid_x: i32,
    grid_z: i32,
) -> bool {
    state
        .find_module(instance_id)
        .and_then(|module| module_footprint(module, catalog))
        .is_some_and(|footprint| {
            footprint_fits(state, catalog, footprint, grid_x, grid_z, Some(instance_id))
        })
}

/// Places a new instance and selects it. Returns the new instance id, or
/// `None` when the placement is invalid.
pub fn add_module(
    state: &mut ConfiguratorState,
    catalog: &Catalog,
    preset_id: &str,
    grid_x: i32,
    grid_z: i32,
) -> Option<String> {
    if !can_place(state, catalog, preset_id, grid_x, grid_z, None) {
        debug!(preset_id, grid_x, grid_z, "rejected module placement");
        return None;
    }

    let module = PlacedModule::new(preset_id, grid_x, grid_z);
    let instance_id = module.instance_id.clone();
    state.placed_modules.push(module);
    state.selected_module_id = Some(instance_id.clone());
    debug!(preset_id, grid_x, grid_z, %instance_id, "placed module");
    Some(instance_id)
}

/// Moves an instance to a new anchor, preserving its rotation.
///
/// Returns `false` (and changes nothing) for unknown instances, invalid
/// targets, or a target equal to the current anchor.
pub fn move_module(
    state: &mut ConfiguratorState,
    catalog: &Catalog,
    instance_id: &str,
    grid_x: i32,
    grid_z: i32,
) -> bool {
    let Some(current) = state.find_module(instance_id).map(PlacedModule::anchor) else {
        return false;
    };
    if current == GridCell::new(grid_x, grid_z) {
        return false;
    }
    if !can_move(state, catalog, instance_id, grid_x, grid_z) {
        debug!(instance_id, grid_x, grid_z, "rejected module move");
        return false;
    }

    if let Some(module) = state.find_module_mut(instance_id) {
        module.grid_x = grid_x;
        module.grid_z = grid_z;
        debug!(instance_id, grid_x, grid_z, "moved module");
        return true;
    }
    false
}

/// Advances an instance's rotation by 90°. Not validated against neighbours
/// or bounds (see module docs).
pub fn rotate_module(state: &mut ConfiguratorState, instance_id: &str) -> bool {
    match state.find_module_mut(instance_id) {
        Some(module) => {
            module.rotation = module.rotation.next();
            debug!(instance_id, rotation = module.rotation.degrees(), "rotated module");
            true
        }
        None => false,
    }
}

/// Removes an instance, clearing the selection and any drag that pointed at it.
pub fn remove_module(state: &mut ConfiguratorState, instance_id: &str) -> bool {
    let before = state.placed_modules.len();
    state.placed_modules.retain(|m| m.instance_id != instance_id);
    if state.placed_modules.len() == before {
        return false;
    }

    if state.selected_module_id.as_deref() == Some(instance_id) {
        state.selected_module_id = None;
    }
    if state.interaction.dragging_instance_id.as_deref() == Some(instance_id) {
        state.interaction.reset();
    }
    debug!(instance_id, "removed module");
    true
}

/// Instances that are out of bounds or overlap another instance, in list order.
///
/// Reachable through unchecked rotation or a starter layout, and kept across
/// reloads; renderers use this to flag modules the user still has to fix.
pub fn find_conflicts(state: &ConfiguratorState, catalog: &Catalog) -> Vec<String> {
    let mut coverage: HashMap<GridCell, usize> = HashMap::new();
    let mut resolved = Vec::new();

    for module in &state.placed_modules {
        if let Some(footprint) = module_footprint(module, catalog) {
            for cell in cells_covered(module.grid_x, module.grid_z, footprint) {
                *coverage.entry(cell).or_insert(0) += 1;
            }
            resolved.push((module, footprint));
        }
    }

    resolved
        .into_iter()
        .filter(|(module, footprint)| {
            !within_bounds(module.grid_x, module.grid_z, *footprint, state.grid)
                || cells_covered(module.grid_x, module.grid_z, *footprint)
                    .any(|cell| coverage.get(&cell).copied().unwrap_or(0) > 1)
        })
        .map(|(module, _)| module.instance_id.clone())
        .collect()
}

/// Smallest grid size `(cells_x, cells_z)` that still contains every resolved
/// module, or `None` when nothing is placed.
pub fn required_extent(state: &ConfiguratorState, catalog: &Catalog) -> Option<(i64, i64)> {
    state
        .placed_modules
        .iter()
        .filter_map(|module| {
            module_footprint(module, catalog).map(|footprint| {
                (
                    i64::from(module.grid_x) + i64::from(footprint.cells_x),
                    i64::from(module.grid_z) + i64::from(footprint.cells_z),
                )
            })
        })
        .reduce(|(ax, az), (bx, bz)| (ax.max(bx), az.max(bz)))
}
