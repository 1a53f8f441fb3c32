//! Versioned export document.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::constants::EXPORT_DOCUMENT_VERSION;
use crate::models::{ConfiguratorState, GridConfig, ModulePreset, Rotation};
use crate::store::{compute_metrics, Metrics};

/// Anchor of an exported module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePosition {
    /// Anchor column
    pub grid_x: i32,
    /// Anchor row
    pub grid_z: i32,
}

/// A placed module with its preset fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedModule {
    /// Full preset, not just its id
    pub preset: ModulePreset,
    /// Anchor cell
    pub position: ModulePosition,
    /// Rotation in degrees
    pub rotation: Rotation,
}

/// Self-contained snapshot of a configuration, suitable for sharing.
///
/// ```json
/// {
///   "version": "1.0",
///   "timestamp": "2026-01-01T12:00:00Z",
///   "gridSize": { "cellsX": 20, "cellsZ": 20 },
///   "modules": [ { "preset": { ... }, "position": { "gridX": 0, "gridZ": 0 }, "rotation": 0 } ],
///   "summary": { "totalSquareMeters": 54.0, "totalPrice": 42000, "moduleCount": 1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Document schema version
    pub version: String,
    /// Generation time
    pub timestamp: DateTime<Utc>,
    /// Grid dimensions
    pub grid_size: GridConfig,
    /// Placed modules whose preset could be resolved
    pub modules: Vec<ExportedModule>,
    /// Derived metrics
    pub summary: Metrics,
}

impl ExportDocument {
    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize export document")
    }
}

/// Builds the export document for `state`.
///
/// Modules whose preset is missing from the catalog are left out of
/// `modules` but still counted in `summary.moduleCount`.
#[must_use]
pub fn to_document(
    state: &ConfiguratorState,
    catalog: &Catalog,
    timestamp: DateTime<Utc>,
) -> ExportDocument {
    let modules = state
        .placed_modules
        .iter()
        .filter_map(|module| {
            catalog
                .find_module(&module.preset_id)
                .map(|preset| ExportedModule {
                    preset: preset.clone(),
                    position: ModulePosition {
                        grid_x: module.grid_x,
                        grid_z: module.grid_z,
                    },
                    rotation: module.rotation,
                })
        })
        .collect();

    ExportDocument {
        version: EXPORT_DOCUMENT_VERSION.to_string(),
        timestamp,
        grid_size: state.grid,
        modules,
        summary: compute_metrics(state, catalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlacedModule;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_document_schema() {
        let mut state = ConfiguratorState::default();
        let mut module = PlacedModule::new("bathroom-1x2", 4, 5);
        module.rotation = Rotation::Deg270;
        state.placed_modules.push(module);

        let document = to_document(&state, &Catalog::builtin(), timestamp());
        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["timestamp"], "2026-03-14T09:30:00Z");
        assert_eq!(json["gridSize"]["cellsX"], 20);
        assert_eq!(json["modules"][0]["preset"]["id"], "bathroom-1x2");
        assert_eq!(json["modules"][0]["preset"]["basePrice"], 21_000);
        assert_eq!(json["modules"][0]["position"]["gridX"], 4);
        assert_eq!(json["modules"][0]["position"]["gridZ"], 5);
        assert_eq!(json["modules"][0]["rotation"], 270);
        assert_eq!(json["summary"]["totalSquareMeters"], 18.0);
        assert_eq!(json["summary"]["totalPrice"], 21_000);
        assert_eq!(json["summary"]["moduleCount"], 1);
    }

    #[test]
    fn test_dangling_modules_are_skipped() {
        let mut state = ConfiguratorState::default();
        state.placed_modules.push(PlacedModule::new("retired", 0, 0));
        state.placed_modules.push(PlacedModule::new("laundry-1x1", 3, 3));

        let document = to_document(&state, &Catalog::builtin(), timestamp());
        assert_eq!(document.modules.len(), 1);
        assert_eq!(document.summary.module_count, 2);
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let mut state = ConfiguratorState::default();
        state.placed_modules.push(PlacedModule::new("kitchen-2x2", 0, 0));
        let document = to_document(&state, &Catalog::builtin(), timestamp());

        let parsed: ExportDocument =
            serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, document);
    }
}
