//! End-to-end placement scenarios through the configurator store.

use prefab_planner::engine::{effective_footprint, module_footprint, DragOutcome};
use prefab_planner::models::{Footprint, GridCell, GridConfig, InteractionMode, Rotation};
use prefab_planner::persistence::{
    validate_and_repair, DurableState, MemoryStore, PersistenceAdapter,
};
use prefab_planner::store::{Command, CommandOutcome, ConfiguratorStore};
use serde_json::json;

mod fixtures;
use fixtures::*;

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_adjacent_modules_do_not_overlap() {
    let mut store = test_store(10, 10);

    assert!(store.add_module("2x2", 0, 0).is_some());
    assert!(store.add_module("2x2", 1, 1).is_none(), "overlapping placement must fail");
    assert!(store.add_module("2x2", 2, 0).is_some(), "adjacent placement must succeed");

    assert_eq!(store.module_count(), 2);
    assert_eq!(store.occupied_index().len(), 8);
}

#[test]
fn test_rotation_swaps_footprint_and_bounds_moves() {
    let mut store = test_store(10, 10);
    let id = store.add_module("3x2", 0, 0).unwrap();

    let module = store.state().find_module(&id).unwrap();
    assert_eq!(
        module_footprint(module, store.catalog()),
        Some(Footprint { cells_x: 3, cells_z: 2 })
    );

    assert!(store.rotate_module(&id));
    let module = store.state().find_module(&id).unwrap();
    assert_eq!(module.rotation, Rotation::Deg90);
    assert_eq!(
        effective_footprint(Footprint { cells_x: 3, cells_z: 2 }, module.rotation),
        Footprint { cells_x: 2, cells_z: 3 }
    );

    // 9 + 2 = 11 > 10
    assert!(!store.move_module(&id, 9, 0));
    // 8 + 2 = 10 fits exactly
    assert!(store.move_module(&id, 8, 0));
    let module = store.state().find_module(&id).unwrap();
    assert_eq!(module.anchor(), GridCell::new(8, 0));
    assert_eq!(module.rotation, Rotation::Deg90);
}

#[test]
fn test_out_of_bounds_and_negative_anchors_rejected() {
    let mut store = test_store(4, 4);
    assert!(store.add_module("2x2", 3, 0).is_none());
    assert!(store.add_module("2x2", -1, 0).is_none());
    assert!(store.add_module("2x2", 0, 3).is_none());
    assert!(store.add_module("missing", 0, 0).is_none());
    assert_eq!(store.module_count(), 0);
}

#[test]
fn test_module_may_move_onto_its_own_cells() {
    let mut store = test_store(10, 10);
    let id = store.add_module("3x2", 0, 0).unwrap();
    assert!(store.move_module(&id, 1, 0));
    assert_eq!(store.state().find_module(&id).unwrap().anchor(), GridCell::new(1, 0));
}

// ============================================================================
// Starters
// ============================================================================

#[test]
fn test_empty_starter_clears_modules() {
    let mut store = test_store(10, 10);
    store.add_module("2x2", 0, 0).unwrap();
    store.add_module("1x1", 5, 5).unwrap();

    assert!(store.load_preset("vuoto"));
    assert_eq!(store.module_count(), 0);
    assert!(store.state().selected_module_id.is_none());
}

#[test]
fn test_starter_replaces_modules_with_fresh_ids() {
    let mut store = test_store(10, 10);
    store.load_preset("pair");
    let first: Vec<String> = store
        .state()
        .placed_modules
        .iter()
        .map(|m| m.instance_id.clone())
        .collect();

    store.load_preset("pair");
    assert_eq!(store.module_count(), 2);
    for module in &store.state().placed_modules {
        assert!(!first.contains(&module.instance_id));
    }
    assert!(store.conflicts().is_empty());
}

#[test]
fn test_unknown_starter_is_a_no_op() {
    let mut store = test_store(10, 10);
    store.add_module("2x2", 0, 0).unwrap();
    let version = store.version();

    assert!(!store.load_preset("does-not-exist"));
    assert_eq!(store.module_count(), 1);
    assert_eq!(store.version(), version);
}

// ============================================================================
// Metrics
// ============================================================================

#[test]
fn test_total_price_is_order_independent() {
    let mut a = test_store(10, 10);
    a.add_module("2x2", 0, 0).unwrap();
    a.add_module("3x2", 4, 4).unwrap();

    let mut b = test_store(10, 10);
    b.add_module("3x2", 4, 4).unwrap();
    b.add_module("2x2", 0, 0).unwrap();

    assert_eq!(a.total_price(), 2500);
    assert_eq!(b.total_price(), 2500);
    // 10 cells of 9 m²
    assert!((a.total_square_meters() - 90.0).abs() < 1e-9);
}

#[test]
fn test_rotation_does_not_change_area() {
    let mut store = test_store(10, 10);
    let id = store.add_module("3x2", 0, 0).unwrap();
    let before = store.total_square_meters();
    store.rotate_module(&id);
    assert!((store.total_square_meters() - before).abs() < 1e-9);
}

// ============================================================================
// Grid resizing
// ============================================================================

#[test]
fn test_grid_cannot_shrink_below_modules() {
    let mut store = test_store(10, 10);
    store.add_module("3x2", 6, 7).unwrap();

    assert!(!store.set_grid_size(8, 10));
    assert!(!store.set_grid_size(10, 8));
    assert!(store.set_grid_size(9, 9));
    assert_eq!(store.state().grid, GridConfig::new(9, 9).unwrap());

    assert!(!store.set_grid_size(0, 9));
}

// ============================================================================
// Interaction flow
// ============================================================================

#[test]
fn test_arm_preview_and_commit() {
    let mut store = test_store(10, 10);
    store.add_module("2x2", 0, 0).unwrap();

    store.set_selected_preset(Some("2x2"));
    assert_eq!(store.state().interaction.mode(), InteractionMode::PresetArmed);

    store.update_preview(Some(GridCell::new(1, 1)));
    let ghost = store.ghost().unwrap();
    assert!(!ghost.is_valid);
    assert!(store.commit_preview().is_none());

    store.update_preview(Some(GridCell::new(4, 4)));
    assert!(store.ghost().unwrap().is_valid);
    assert!(store.commit_preview().is_some());
    assert_eq!(store.module_count(), 2);
    assert_eq!(store.state().interaction.mode(), InteractionMode::Idle);
}

#[test]
fn test_drag_to_occupied_cell_snaps_back() {
    let mut store = test_store(10, 10);
    let a = store.add_module("2x2", 0, 0).unwrap();
    store.add_module("2x2", 4, 0).unwrap();

    assert!(store.start_drag(&a));
    store.update_preview(Some(GridCell::new(3, 0)));
    assert_eq!(store.stop_drag(), DragOutcome::SnappedBack);
    assert_eq!(store.state().find_module(&a).unwrap().anchor(), GridCell::new(0, 0));

    store.start_drag(&a);
    store.update_preview(Some(GridCell::new(0, 5)));
    assert_eq!(store.stop_drag(), DragOutcome::Moved);
    assert_eq!(store.state().find_module(&a).unwrap().anchor(), GridCell::new(0, 5));
}

#[test]
fn test_scripted_commands_report_outcomes() {
    let mut store = test_store(10, 10);
    let outcomes = store.dispatch_all(vec![
        Command::AddModule {
            preset_id: "2x2".into(),
            grid_x: 0,
            grid_z: 0,
        },
        Command::AddModule {
            preset_id: "2x2".into(),
            grid_x: 1,
            grid_z: 1,
        },
        Command::ResetView,
    ]);

    assert!(matches!(outcomes[0], CommandOutcome::Created { .. }));
    assert_eq!(outcomes[1], CommandOutcome::Rejected);
    assert_eq!(outcomes[2], CommandOutcome::Applied);
    assert_eq!(store.state().reset_view_trigger, 1);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_negative_persisted_width_uses_default() {
    let repaired = validate_and_repair(
        &json!({ "gridCellsX": -5, "gridCellsZ": 12, "placedModules": [] }),
        &test_catalog(),
    );
    assert_eq!(repaired.grid_cells_x, 20);
    assert_eq!(repaired.grid_cells_z, 12);
}

#[test]
fn test_state_survives_reload() {
    let backend = MemoryStore::new();
    let grid = GridConfig::new(10, 10).unwrap();

    let id = {
        let mut store = ConfiguratorStore::with_persistence(
            test_catalog(),
            grid,
            PersistenceAdapter::new(backend.clone()),
        );
        store.set_grid_size(12, 11);
        let id = store.add_module("3x2", 2, 3).unwrap();
        store.rotate_module(&id);
        // Transient state is not persisted
        store.set_selected_preset(Some("2x2"));
        id
    };

    let store =
        ConfiguratorStore::with_persistence(test_catalog(), grid, PersistenceAdapter::new(backend));
    assert_eq!(store.state().grid, GridConfig::new(12, 11).unwrap());
    let module = store.state().find_module(&id).unwrap();
    assert_eq!(module.anchor(), GridCell::new(2, 3));
    assert_eq!(module.rotation, Rotation::Deg90);
    assert_eq!(store.state().interaction.mode(), InteractionMode::Idle);
    assert!(store.state().selected_module_id.is_none());
}

#[test]
fn test_rotated_conflicts_survive_reload() {
    let backend = MemoryStore::new();
    let grid = GridConfig::new(10, 10).unwrap();
    let open = |backend: &MemoryStore| {
        ConfiguratorStore::with_persistence(
            test_catalog(),
            grid,
            PersistenceAdapter::new(backend.clone()),
        )
    };

    let mut store = open(&backend);
    let overlapping = store.add_module("3x2", 0, 0).unwrap();
    store.add_module("2x2", 0, 2).unwrap();
    let hanging = store.add_module("3x2", 0, 8).unwrap();
    // 3x2 turns into 2x3: overlaps the 2x2 below it, and runs past row 9
    assert!(store.rotate_module(&overlapping));
    assert!(store.rotate_module(&hanging));
    assert_eq!(store.conflicts().len(), 3);
    let before = DurableState::from_state(store.state());

    let reloaded = open(&backend);
    assert_eq!(reloaded.module_count(), 3);
    assert_eq!(DurableState::from_state(reloaded.state()), before);
    assert_eq!(reloaded.conflicts(), store.conflicts());
}

#[test]
fn test_hard_reset_purges_storage() {
    let backend = MemoryStore::new();
    let mut store = ConfiguratorStore::with_persistence(
        test_catalog(),
        GridConfig::new(10, 10).unwrap(),
        PersistenceAdapter::new(backend.clone()),
    );
    store.set_grid_size(15, 15);
    store.add_module("2x2", 0, 0).unwrap();

    store.hard_reset();
    assert_eq!(store.module_count(), 0);
    assert_eq!(store.state().grid, GridConfig::new(10, 10).unwrap());

    let reloaded = ConfiguratorStore::with_persistence(
        test_catalog(),
        GridConfig::new(10, 10).unwrap(),
        PersistenceAdapter::new(backend),
    );
    assert_eq!(reloaded.module_count(), 0);
}
