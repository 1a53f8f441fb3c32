//! The configurator store: single owner of the state.
//!
//! All mutation goes through [`ConfiguratorStore::dispatch`], which applies a
//! [`Command`] with the placement engine, bumps the change version, notifies
//! subscribers and saves the durable subset when it may have changed.
//! Because nothing else holds a mutable reference to the state, the
//! no-overlap and in-bounds invariants are enforced at this one point.

pub mod commands;
pub mod metrics;

use tracing::{debug, warn};

use crate::catalog::{starter_problems, Catalog};
use crate::engine::interaction::{self, DragOutcome, Ghost};
use crate::engine::placement::{self, required_extent};
use crate::engine::{build_occupied_index, OccupiedCellIndex};
use crate::models::{ConfiguratorState, GridCell, GridConfig, PlacedModule};
use crate::persistence::PersistenceAdapter;

pub use commands::{Command, CommandOutcome};
pub use metrics::{compute_metrics, Metrics};

/// Change listener: receives the new state and its version.
pub type Subscriber = Box<dyn FnMut(&ConfiguratorState, u64) + Send>;

/// Handle returned by [`ConfiguratorStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Aggregate root owning the catalog, the state and its persistence.
pub struct ConfiguratorStore {
    catalog: Catalog,
    state: ConfiguratorState,
    default_grid: GridConfig,
    persistence: Option<PersistenceAdapter>,
    version: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ConfiguratorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguratorStore")
            .field("state", &self.state)
            .field("default_grid", &self.default_grid)
            .field("persistence", &self.persistence)
            .field("version", &self.version)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl ConfiguratorStore {
    /// Creates an in-memory store on the default grid.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_grid(catalog, GridConfig::default())
    }

    /// Creates an in-memory store; `default_grid` is also what
    /// [`hard_reset`](Self::hard_reset) restores.
    #[must_use]
    pub fn with_grid(catalog: Catalog, default_grid: GridConfig) -> Self {
        Self {
            catalog,
            state: ConfiguratorState::new(default_grid),
            default_grid,
            persistence: None,
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a store backed by `adapter`, restoring any saved state.
    #[must_use]
    pub fn with_persistence(
        catalog: Catalog,
        default_grid: GridConfig,
        adapter: PersistenceAdapter,
    ) -> Self {
        let mut store = Self::with_grid(catalog, default_grid);
        if let Some(durable) = adapter.load(&store.catalog) {
            debug!(
                grid = %durable.grid(),
                modules = durable.placed_modules.len(),
                "restored configuration"
            );
            durable.apply_to(&mut store.state);
        }
        store.persistence = Some(adapter);
        store
    }

    /// Catalog used to resolve preset ids.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current state (read-only).
    #[must_use]
    pub const fn state(&self) -> &ConfiguratorState {
        &self.state
    }

    /// Change counter, incremented after every applied command.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Registers a change listener.
    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Removes a change listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Applies one command.
    pub fn dispatch(&mut self, command: Command) -> CommandOutcome {
        let durable = command.touches_durable_state();
        let is_hard_reset = matches!(command, Command::HardReset);
        let name = command.name();

        let outcome = self.apply(command);
        debug!(command = name, ?outcome, "dispatched command");

        if !outcome.is_applied() {
            return outcome;
        }

        self.version += 1;
        if is_hard_reset {
            self.purge();
        } else if durable {
            self.save();
        }
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.state, self.version);
        }
        outcome
    }

    /// Applies a sequence of commands in order, returning each outcome.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<CommandOutcome> {
        commands.into_iter().map(|c| self.dispatch(c)).collect()
    }

    fn apply(&mut self, command: Command) -> CommandOutcome {
        let catalog = &self.catalog;
        let state = &mut self.state;

        match command {
            Command::AddModule {
                preset_id,
                grid_x,
                grid_z,
            } => placement::add_module(state, catalog, &preset_id, grid_x, grid_z)
                .map_or(CommandOutcome::Rejected, |instance_id| {
                    CommandOutcome::Created { instance_id }
                }),
            Command::MoveModule {
                instance_id,
                grid_x,
                grid_z,
            } => CommandOutcome::from_flag(placement::move_module(
                state,
                catalog,
                &instance_id,
                grid_x,
                grid_z,
            )),
            Command::RotateModule { instance_id } => {
                CommandOutcome::from_flag(placement::rotate_module(state, &instance_id))
            }
            Command::RemoveModule { instance_id } => {
                CommandOutcome::from_flag(placement::remove_module(state, &instance_id))
            }
            Command::SelectModule { instance_id } => {
                CommandOutcome::from_flag(select(state, instance_id))
            }
            Command::SetSelectedPreset { preset_id } => CommandOutcome::from_flag(
                interaction::set_selected_preset(state, catalog, preset_id.as_deref()),
            ),
            Command::StartDrag { instance_id } => {
                CommandOutcome::from_flag(interaction::start_drag(state, &instance_id))
            }
            Command::UpdatePreview { cell } => {
                CommandOutcome::from_flag(interaction::update_preview(state, catalog, cell))
            }
            Command::ClearPreview => CommandOutcome::from_flag(interaction::clear_preview(state)),
            Command::CommitPreview => interaction::commit_preview(state, catalog)
                .map_or(CommandOutcome::Rejected, |instance_id| {
                    CommandOutcome::Created { instance_id }
                }),
            Command::StopDrag => match interaction::stop_drag(state, catalog) {
                DragOutcome::NotDragging => CommandOutcome::Rejected,
                drag => CommandOutcome::Released { drag },
            },
            Command::DeleteSelected => {
                CommandOutcome::from_flag(interaction::delete_selected(state))
            }
            Command::RotateSelected => {
                CommandOutcome::from_flag(interaction::rotate_selected(state))
            }
            Command::LoadPreset { starter_id } => {
                CommandOutcome::from_flag(load_starter(state, catalog, &starter_id))
            }
            Command::ClearAll => {
                state.placed_modules.clear();
                state.selected_module_id = None;
                state.interaction.reset();
                CommandOutcome::Applied
            }
            Command::HardReset => {
                let trigger = state.reset_view_trigger.wrapping_add(1);
                *state = ConfiguratorState::new(self.default_grid);
                state.reset_view_trigger = trigger;
                CommandOutcome::Applied
            }
            Command::SetGridSize { cells_x, cells_z } => {
                CommandOutcome::from_flag(resize_grid(state, catalog, cells_x, cells_z))
            }
            Command::ResetView => {
                state.reset_view_trigger = state.reset_view_trigger.wrapping_add(1);
                CommandOutcome::Applied
            }
        }
    }

    fn save(&mut self) {
        if let Some(adapter) = self.persistence.as_mut() {
            if let Err(err) = adapter.save(&self.state) {
                warn!("Failed to save configuration: {err:#}");
            }
        }
    }

    fn purge(&mut self) {
        if let Some(adapter) = self.persistence.as_mut() {
            if let Err(err) = adapter.purge() {
                warn!("Failed to purge stored configuration: {err:#}");
            }
        }
    }

    // Typed command helpers

    /// Places a new unrotated instance; returns its id.
    pub fn add_module(&mut self, preset_id: &str, grid_x: i32, grid_z: i32) -> Option<String> {
        self.dispatch(Command::AddModule {
            preset_id: preset_id.to_string(),
            grid_x,
            grid_z,
        })
        .created_id()
        .map(str::to_string)
    }

    /// Moves an instance, keeping its rotation.
    pub fn move_module(&mut self, instance_id: &str, grid_x: i32, grid_z: i32) -> bool {
        self.dispatch(Command::MoveModule {
            instance_id: instance_id.to_string(),
            grid_x,
            grid_z,
        })
        .is_applied()
    }

    /// Rotates an instance by 90° without re-validating it.
    pub fn rotate_module(&mut self, instance_id: &str) -> bool {
        self.dispatch(Command::RotateModule {
            instance_id: instance_id.to_string(),
        })
        .is_applied()
    }

    /// Removes an instance.
    pub fn remove_module(&mut self, instance_id: &str) -> bool {
        self.dispatch(Command::RemoveModule {
            instance_id: instance_id.to_string(),
        })
        .is_applied()
    }

    /// Selects an instance, or clears the selection with `None`.
    pub fn select_module(&mut self, instance_id: Option<&str>) -> bool {
        self.dispatch(Command::SelectModule {
            instance_id: instance_id.map(str::to_string),
        })
        .is_applied()
    }

    /// Arms a preset, or disarms with `None`.
    pub fn set_selected_preset(&mut self, preset_id: Option<&str>) -> bool {
        self.dispatch(Command::SetSelectedPreset {
            preset_id: preset_id.map(str::to_string),
        })
        .is_applied()
    }

    /// Picks up an instance for dragging.
    pub fn start_drag(&mut self, instance_id: &str) -> bool {
        self.dispatch(Command::StartDrag {
            instance_id: instance_id.to_string(),
        })
        .is_applied()
    }

    /// Updates the preview for the cell under the pointer.
    pub fn update_preview(&mut self, cell: Option<GridCell>) -> bool {
        self.dispatch(Command::UpdatePreview { cell }).is_applied()
    }

    /// Drops the preview.
    pub fn clear_preview(&mut self) -> bool {
        self.dispatch(Command::ClearPreview).is_applied()
    }

    /// Places the armed preset at the preview cell.
    pub fn commit_preview(&mut self) -> Option<String> {
        self.dispatch(Command::CommitPreview)
            .created_id()
            .map(str::to_string)
    }

    /// Releases the dragged instance.
    pub fn stop_drag(&mut self) -> DragOutcome {
        match self.dispatch(Command::StopDrag) {
            CommandOutcome::Released { drag } => drag,
            _ => DragOutcome::NotDragging,
        }
    }

    /// Removes the selected instance (ignored while dragging).
    pub fn delete_selected(&mut self) -> bool {
        self.dispatch(Command::DeleteSelected).is_applied()
    }

    /// Rotates the selected instance (ignored while dragging).
    pub fn rotate_selected(&mut self) -> bool {
        self.dispatch(Command::RotateSelected).is_applied()
    }

    /// Replaces all modules with a starter layout.
    pub fn load_preset(&mut self, starter_id: &str) -> bool {
        self.dispatch(Command::LoadPreset {
            starter_id: starter_id.to_string(),
        })
        .is_applied()
    }

    /// Removes every module.
    pub fn clear_all(&mut self) -> bool {
        self.dispatch(Command::ClearAll).is_applied()
    }

    /// Clears everything, restores the default grid and purges storage.
    pub fn hard_reset(&mut self) -> bool {
        self.dispatch(Command::HardReset).is_applied()
    }

    /// Resizes the grid. Rejected if a module would end up outside it.
    pub fn set_grid_size(&mut self, cells_x: u32, cells_z: u32) -> bool {
        self.dispatch(Command::SetGridSize { cells_x, cells_z })
            .is_applied()
    }

    /// Asks the renderer to recenter.
    pub fn reset_view(&mut self) -> bool {
        self.dispatch(Command::ResetView).is_applied()
    }

    // Read accessors

    /// Area, price and count of the current configuration.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        compute_metrics(&self.state, &self.catalog)
    }

    /// Floor area in square meters.
    #[must_use]
    pub fn total_square_meters(&self) -> f64 {
        self.metrics().total_square_meters
    }

    /// Sum of base prices.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.metrics().total_price
    }

    /// Number of placed instances.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.state.placed_modules.len()
    }

    /// Whether a new instance of `preset_id` fits at `(grid_x, grid_z)`.
    #[must_use]
    pub fn can_place(&self, preset_id: &str, grid_x: i32, grid_z: i32) -> bool {
        placement::can_place(&self.state, &self.catalog, preset_id, grid_x, grid_z, None)
    }

    /// Instances whose preset is missing from the catalog.
    #[must_use]
    pub fn unresolved_modules(&self) -> Vec<&PlacedModule> {
        self.state
            .placed_modules
            .iter()
            .filter(|m| self.catalog.find_module(&m.preset_id).is_none())
            .collect()
    }

    /// Instances that overlap or leave the grid.
    #[must_use]
    pub fn conflicts(&self) -> Vec<String> {
        placement::find_conflicts(&self.state, &self.catalog)
    }

    /// Cells covered by placed modules.
    #[must_use]
    pub fn occupied_index(&self) -> OccupiedCellIndex {
        build_occupied_index(&self.state.placed_modules, &self.catalog, None)
    }

    /// Ghost preview to draw, if any.
    #[must_use]
    pub fn ghost(&self) -> Option<Ghost> {
        interaction::ghost(&self.state, &self.catalog)
    }
}

fn select(state: &mut ConfiguratorState, instance_id: Option<String>) -> bool {
    match instance_id {
        Some(id) if state.find_module(&id).is_none() => false,
        next => {
            if state.selected_module_id == next {
                return false;
            }
            state.selected_module_id = next;
            true
        }
    }
}

fn load_starter(state: &mut ConfiguratorState, catalog: &Catalog, starter_id: &str) -> bool {
    let Some(starter) = catalog.find_starter(starter_id) else {
        debug!(starter_id, "ignored unknown starter layout");
        return false;
    };

    if cfg!(debug_assertions) {
        for problem in starter_problems(starter, catalog, state.grid) {
            warn!(starter_id, "Starter layout authoring problem: {problem}");
        }
    }

    state.placed_modules = starter
        .modules
        .iter()
        .map(|entry| PlacedModule::new(entry.preset_id.clone(), entry.grid_x, entry.grid_z))
        .collect();
    state.selected_module_id = None;
    state.interaction.reset();
    state.reset_view_trigger = state.reset_view_trigger.wrapping_add(1);
    debug!(starter_id, modules = state.placed_modules.len(), "loaded starter layout");
    true
}

fn resize_grid(state: &mut ConfiguratorState, catalog: &Catalog, cells_x: u32, cells_z: u32) -> bool {
    let grid = match GridConfig::new(cells_x, cells_z) {
        Ok(grid) => grid,
        Err(err) => {
            debug!("rejected grid size: {err}");
            return false;
        }
    };

    if let Some((need_x, need_z)) = required_extent(state, catalog) {
        if need_x > i64::from(cells_x) || need_z > i64::from(cells_z) {
            debug!(
                %grid,
                need_x,
                need_z,
                "rejected grid size smaller than placed modules"
            );
            return false;
        }
    }

    state.grid = grid;
    state.interaction.clear_preview();
    true
}
