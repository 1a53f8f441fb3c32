//! Derived configuration metrics.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::constants::CELL_AREA_SQUARE_METERS;
use crate::engine::module_footprint;
use crate::models::ConfiguratorState;

/// Area, price and module count of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Floor area in square meters
    pub total_square_meters: f64,
    /// Sum of the placed modules' base prices
    pub total_price: u64,
    /// Number of placed instances
    pub module_count: usize,
}

/// Computes the metrics of `state`.
///
/// Area uses each module's effective footprint, so rotation never changes it.
/// Price is per module, not per area. Modules whose preset is missing from the
/// catalog count towards `module_count` only.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_metrics(state: &ConfiguratorState, catalog: &Catalog) -> Metrics {
    let mut cells: u64 = 0;
    let mut total_price: u64 = 0;

    for module in &state.placed_modules {
        if let Some(preset) = catalog.find_module(&module.preset_id) {
            total_price = total_price.saturating_add(preset.base_price);
        }
        if let Some(footprint) = module_footprint(module, catalog) {
            cells = cells.saturating_add(footprint.area_cells());
        }
    }

    Metrics {
        total_square_meters: cells as f64 * CELL_AREA_SQUARE_METERS,
        total_price,
        module_count: state.placed_modules.len(),
    }
}
