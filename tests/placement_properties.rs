//! Property tests: without rotation, no sequence of commands can produce
//! overlapping or out-of-bounds modules; with rotation, whatever the user
//! reaches is restored exactly after a reload.

use proptest::prelude::*;

use prefab_planner::engine::{find_conflicts, module_footprint, within_bounds};
use prefab_planner::models::GridConfig;
use prefab_planner::persistence::{DurableState, MemoryStore, PersistenceAdapter};
use prefab_planner::store::{Command, ConfiguratorStore};

mod fixtures;
use fixtures::*;

#[derive(Debug, Clone)]
enum Op {
    Add { preset: usize, x: i32, z: i32 },
    Move { target: usize, x: i32, z: i32 },
    Remove { target: usize },
    Resize { cells_x: u32, cells_z: u32 },
    Rotate { target: usize },
    Starter { pair: bool },
}

const PRESETS: [&str; 3] = ["2x2", "3x2", "1x1"];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..PRESETS.len(), -2i32..12, -2i32..12)
            .prop_map(|(preset, x, z)| Op::Add { preset, x, z }),
        3 => (0usize..16, -2i32..12, -2i32..12)
            .prop_map(|(target, x, z)| Op::Move { target, x, z }),
        1 => (0usize..16).prop_map(|target| Op::Remove { target }),
        1 => (1u32..14, 1u32..14).prop_map(|(cells_x, cells_z)| Op::Resize { cells_x, cells_z }),
    ]
}

fn op_with_rotation_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => op_strategy(),
        3 => (0usize..16).prop_map(|target| Op::Rotate { target }),
        1 => any::<bool>().prop_map(|pair| Op::Starter { pair }),
    ]
}

fn instance_at(store: &ConfiguratorStore, target: usize) -> Option<String> {
    let modules = &store.state().placed_modules;
    if modules.is_empty() {
        return None;
    }
    Some(modules[target % modules.len()].instance_id.clone())
}

fn apply(store: &mut ConfiguratorStore, op: &Op) {
    let command = match op {
        Op::Add { preset, x, z } => Command::AddModule {
            preset_id: PRESETS[*preset].to_string(),
            grid_x: *x,
            grid_z: *z,
        },
        Op::Move { target, x, z } => match instance_at(store, *target) {
            Some(instance_id) => Command::MoveModule {
                instance_id,
                grid_x: *x,
                grid_z: *z,
            },
            None => return,
        },
        Op::Remove { target } => match instance_at(store, *target) {
            Some(instance_id) => Command::RemoveModule { instance_id },
            None => return,
        },
        Op::Resize { cells_x, cells_z } => Command::SetGridSize {
            cells_x: *cells_x,
            cells_z: *cells_z,
        },
        Op::Rotate { target } => match instance_at(store, *target) {
            Some(instance_id) => Command::RotateModule { instance_id },
            None => return,
        },
        Op::Starter { pair } => Command::LoadPreset {
            starter_id: if *pair { "pair" } else { "vuoto" }.to_string(),
        },
    };
    store.dispatch(command);
}

proptest! {
    #[test]
    fn placements_never_overlap_or_leave_the_grid(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut store = test_store(10, 10);

        for op in &ops {
            apply(&mut store, op);

            let state = store.state();
            let catalog = store.catalog();
            prop_assert!(find_conflicts(state, catalog).is_empty());

            let mut covered = 0usize;
            for module in &state.placed_modules {
                let footprint = module_footprint(module, catalog).unwrap();
                prop_assert!(within_bounds(module.grid_x, module.grid_z, footprint, state.grid));
                covered += (footprint.cells_x * footprint.cells_z) as usize;
            }
            // Every covered cell has exactly one owner
            prop_assert_eq!(store.occupied_index().len(), covered);
        }
    }

    #[test]
    fn price_is_sum_of_base_prices(presets in prop::collection::vec(0..PRESETS.len(), 0..12)) {
        let mut store = test_store(40, 40);
        let mut expected = 0u64;

        for (i, preset) in presets.iter().enumerate() {
            let x = i32::try_from(i * 3).unwrap();
            if store.add_module(PRESETS[*preset], x, 0).is_some() {
                expected += store.catalog().find_module(PRESETS[*preset]).unwrap().base_price;
            }
        }

        prop_assert_eq!(store.total_price(), expected);
        prop_assert_eq!(store.module_count(), presets.len());
    }

    #[test]
    fn reload_restores_every_reachable_state(ops in prop::collection::vec(op_with_rotation_strategy(), 1..40)) {
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
        for op in &ops {
            apply(&mut store, op);
        }

        let reloaded = open(&backend);
        prop_assert_eq!(
            DurableState::from_state(reloaded.state()),
            DurableState::from_state(store.state())
        );
        prop_assert_eq!(reloaded.conflicts(), store.conflicts());
    }
}
