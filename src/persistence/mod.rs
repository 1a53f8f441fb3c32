//! Persistence of the durable configuration subset.
//!
//! Only the grid size and the placed modules survive a restart; selection and
//! interaction state are transient. Stored values are JSON documents of the
//! form:
//!
//! ```json
//! { "version": 1, "state": { "gridCellsX": 20, "gridCellsZ": 20, "placedModules": [] } }
//! ```
//!
//! Loading never fails on bad content: whatever is stored goes through
//! [`validate_and_repair`].

pub mod repair;
pub mod store;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::constants::{DEFAULT_GRID_CELLS_X, DEFAULT_GRID_CELLS_Z, STORAGE_KEY, STORAGE_SCHEMA_VERSION};
use crate::models::{ConfiguratorState, GridConfig, PlacedModule};

pub use repair::validate_and_repair;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// The part of [`ConfiguratorState`] that is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurableState {
    /// Grid width in cells
    pub grid_cells_x: u32,
    /// Grid depth in cells
    pub grid_cells_z: u32,
    /// Placed module instances
    pub placed_modules: Vec<PlacedModule>,
}

impl Default for DurableState {
    fn default() -> Self {
        Self {
            grid_cells_x: DEFAULT_GRID_CELLS_X,
            grid_cells_z: DEFAULT_GRID_CELLS_Z,
            placed_modules: Vec::new(),
        }
    }
}

impl DurableState {
    /// Extracts the durable subset of a state.
    #[must_use]
    pub fn from_state(state: &ConfiguratorState) -> Self {
        Self {
            grid_cells_x: state.grid.cells_x,
            grid_cells_z: state.grid.cells_z,
            placed_modules: state.placed_modules.clone(),
        }
    }

    /// Grid described by this snapshot.
    #[must_use]
    pub const fn grid(&self) -> GridConfig {
        GridConfig {
            cells_x: self.grid_cells_x,
            cells_z: self.grid_cells_z,
        }
    }

    /// Replaces the durable subset of `state`, resetting transient fields.
    pub fn apply_to(self, state: &mut ConfiguratorState) {
        state.grid = self.grid();
        state.placed_modules = self.placed_modules;
        state.selected_module_id = None;
        state.interaction.reset();
    }
}

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    version: u32,
    state: &'a DurableState,
}

/// Saves, loads and purges the durable subset through a [`KeyValueStore`].
pub struct PersistenceAdapter {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl PersistenceAdapter {
    /// Creates an adapter writing under the default storage key.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Creates an adapter writing under a custom key.
    pub fn with_key(backend: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
        }
    }

    /// Storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the durable subset of `state`.
    pub fn save(&mut self, state: &ConfiguratorState) -> Result<()> {
        let durable = DurableState::from_state(state);
        let envelope = Envelope {
            version: STORAGE_SCHEMA_VERSION,
            state: &durable,
        };
        let content =
            serde_json::to_string_pretty(&envelope).context("Failed to serialize configuration")?;
        self.backend.set(&self.key, &content)?;
        debug!(key = %self.key, modules = durable.placed_modules.len(), "saved configuration");
        Ok(())
    }

    /// Reads and repairs the stored state.
    ///
    /// Returns `None` when nothing is stored or the backend cannot be read.
    /// Unparseable content yields the defaults.
    #[must_use]
    pub fn load(&self, catalog: &Catalog) -> Option<DurableState> {
        let content = match self.backend.get(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %self.key, "Failed to read stored configuration: {err:#}");
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(raw) => Some(validate_and_repair(&raw, catalog)),
            Err(err) => {
                warn!(key = %self.key, %err, "Stored configuration is not valid JSON; using defaults");
                Some(DurableState::default())
            }
        }
    }

    /// Deletes the stored state.
    pub fn purge(&mut self) -> Result<()> {
        self.backend.remove(&self.key)?;
        debug!(key = %self.key, "purged stored configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rotation;

    fn state_with_module() -> ConfiguratorState {
        let mut state = ConfiguratorState::new(GridConfig::new(12, 9).unwrap());
        let mut module = PlacedModule::new("kitchen-2x2", 1, 2);
        module.rotation = Rotation::Deg180;
        state.selected_module_id = Some(module.instance_id.clone());
        state.placed_modules.push(module);
        state
    }

    #[test]
    fn test_save_writes_envelope() {
        let store = MemoryStore::new();
        let mut adapter = PersistenceAdapter::new(store.clone());
        adapter.save(&state_with_module()).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&store.peek(STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["state"]["gridCellsX"], 12);
        assert_eq!(raw["state"]["placedModules"][0]["rotation"], 180);
        assert!(raw["state"].get("selectedModuleId").is_none());
        assert!(raw["state"].get("interaction").is_none());
    }

    #[test]
    fn test_save_then_load_restores_durable_subset() {
        let state = state_with_module();
        let mut adapter = PersistenceAdapter::new(MemoryStore::new());
        adapter.save(&state).unwrap();

        let loaded = adapter.load(&Catalog::builtin()).unwrap();
        assert_eq!(loaded, DurableState::from_state(&state));

        let mut restored = ConfiguratorState::default();
        loaded.apply_to(&mut restored);
        assert_eq!(restored.grid, state.grid);
        assert_eq!(restored.placed_modules, state.placed_modules);
        assert_eq!(restored.selected_module_id, None);
    }

    #[test]
    fn test_load_empty_store_is_none() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        assert!(adapter.load(&Catalog::builtin()).is_none());
    }

    #[test]
    fn test_load_garbage_yields_defaults() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        let adapter = PersistenceAdapter::new(store);
        assert_eq!(adapter.load(&Catalog::builtin()), Some(DurableState::default()));
    }

    #[test]
    fn test_purge_removes_key() {
        let store = MemoryStore::new();
        let mut adapter = PersistenceAdapter::new(store.clone());
        adapter.save(&ConfiguratorState::default()).unwrap();
        adapter.purge().unwrap();
        assert!(store.peek(STORAGE_KEY).is_none());
    }
}
