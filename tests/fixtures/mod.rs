//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use prefab_planner::catalog::{Catalog, StarterLayout, StarterPlacement};
use prefab_planner::models::{Footprint, GridConfig, ModuleCategory, ModulePreset};
use prefab_planner::store::ConfiguratorStore;
use tempfile::TempDir;

/// Builds an unvalidated preset with the given footprint and price.
pub fn preset(id: &str, cells_x: u32, cells_z: u32, base_price: u64) -> ModulePreset {
    ModulePreset {
        id: id.to_string(),
        name: format!("Test {id}"),
        category: ModuleCategory::Living,
        footprint: Footprint { cells_x, cells_z },
        base_price,
        icon: String::new(),
        description: String::new(),
    }
}

/// Small deterministic catalog:
///
/// - `2x2` priced 1000, `3x2` priced 1500, `1x1` priced 400
/// - starters `vuoto` (empty) and `pair` (`2x2` at 0,0 and `3x2` at 2,0)
pub fn test_catalog() -> Catalog {
    Catalog::new(
        vec![
            preset("2x2", 2, 2, 1000),
            preset("3x2", 3, 2, 1500),
            preset("1x1", 1, 1, 400),
        ],
        vec![
            StarterLayout::new("vuoto", "Empty", "Nothing placed", Vec::new()),
            StarterLayout::new(
                "pair",
                "Pair",
                "Two modules side by side",
                vec![
                    StarterPlacement::new("2x2", 0, 0),
                    StarterPlacement::new("3x2", 2, 0),
                ],
            ),
        ],
    )
}

/// In-memory store over [`test_catalog`] on a `cells_x` × `cells_z` grid.
pub fn test_store(cells_x: u32, cells_z: u32) -> ConfiguratorStore {
    let grid = GridConfig::new(cells_x, cells_z).expect("valid test grid");
    ConfiguratorStore::with_grid(test_catalog(), grid)
}

/// Writes [`test_catalog`] as a JSON5 catalog file and returns its path.
pub fn write_catalog_file(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.json5");
    let content = serde_json::to_string_pretty(&test_catalog()).expect("serialize catalog");
    fs::write(&path, content).expect("write catalog file");
    path
}

/// Path to the prefab-planner binary.
pub fn planner_bin() -> String {
    std::env::var("CARGO_BIN_EXE_prefab-planner")
        .unwrap_or_else(|_| "target/debug/prefab-planner".to_string())
}

/// Isolated CLI environment: its own config directory and data directory.
pub struct CliEnv {
    pub temp: TempDir,
}

impl CliEnv {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    /// Command with the isolated config directory and `--data-dir` set.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(planner_bin());
        cmd.env("PREFAB_PLANNER_CONFIG_DIR", self.config_dir());
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.args(args);
        cmd
    }

    /// Runs a command and asserts it exits with code 0. Returns stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute command");
        assert_eq!(
            output.status.code(),
            Some(0),
            "`{}` should succeed. stderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Runs a command and parses stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_ok(args);
        serde_json::from_str(&stdout).expect("Should parse JSON output")
    }
}
