//! Aggregate configurator state.

use crate::models::{GridConfig, InteractionState, PlacedModule};
use serde::{Deserialize, Serialize};

/// Aggregate root of the configurator.
///
/// Mutated only through the store's commands; renderers and persistence read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguratorState {
    /// Grid bounds
    pub grid: GridConfig,
    /// Placed module instances (order carries no meaning)
    pub placed_modules: Vec<PlacedModule>,
    /// Highlighted placed instance
    pub selected_module_id: Option<String>,
    /// Armed preset / drag / preview
    pub interaction: InteractionState,
    /// Incremented whenever the renderer should recenter its camera
    pub reset_view_trigger: u64,
}

impl ConfiguratorState {
    /// Creates an empty configuration on the given grid.
    #[must_use]
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Looks up a placed instance.
    #[must_use]
    pub fn find_module(&self, instance_id: &str) -> Option<&PlacedModule> {
        self.placed_modules
            .iter()
            .find(|m| m.instance_id == instance_id)
    }

    /// Looks up a placed instance mutably.
    pub fn find_module_mut(&mut self, instance_id: &str) -> Option<&mut PlacedModule> {
        self.placed_modules
            .iter_mut()
            .find(|m| m.instance_id == instance_id)
    }

    /// The currently selected instance, if it still exists.
    #[must_use]
    pub fn selected_module(&self) -> Option<&PlacedModule> {
        self.selected_module_id
            .as_deref()
            .and_then(|id| self.find_module(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_module() {
        let mut state = ConfiguratorState::new(GridConfig::new(10, 10).unwrap());
        let module = PlacedModule::new("kitchen", 1, 1);
        let id = module.instance_id.clone();
        state.placed_modules.push(module);

        assert!(state.find_module(&id).is_some());
        assert!(state.find_module("missing").is_none());

        state.find_module_mut(&id).unwrap().grid_x = 4;
        assert_eq!(state.find_module(&id).unwrap().grid_x, 4);
    }

    #[test]
    fn test_selected_module_ignores_stale_id() {
        let mut state = ConfiguratorState::default();
        state.selected_module_id = Some("gone".to_string());
        assert!(state.selected_module().is_none());
    }
}
