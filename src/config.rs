//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::constants::{CONFIG_DIR_NAME, DEFAULT_GRID_CELLS_X, DEFAULT_GRID_CELLS_Z};
use crate::models::GridConfig;

/// Environment variable overriding the config directory (used by tests and
/// portable installs).
pub const CONFIG_DIR_ENV: &str = "PREFAB_PLANNER_CONFIG_DIR";

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Lowercase name as accepted by `config set --theme`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => anyhow::bail!("Invalid theme mode. Must be 'auto', 'light', or 'dark'"),
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the saved configuration (defaults to `<config dir>/data`)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Optional JSON5 file extending the built-in catalog
    #[serde(default)]
    pub catalog_file: Option<PathBuf>,
}

/// Grid size used for new configurations and after a hard reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDefaults {
    /// Width in cells
    pub cells_x: u32,
    /// Depth in cells
    pub cells_z: u32,
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self {
            cells_x: DEFAULT_GRID_CELLS_X,
            cells_z: DEFAULT_GRID_CELLS_Z,
        }
    }
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the help overlay when the TUI starts
    #[serde(default = "default_true")]
    pub show_help_on_startup: bool,
    /// Theme mode
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

const fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: true,
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/PrefabPlanner/config.toml`
/// - macOS: `~/Library/Application Support/PrefabPlanner/config.toml`
/// - Windows: `%APPDATA%\PrefabPlanner\config.toml`
///
/// `PREFAB_PLANNER_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - grid defaults must be a valid grid (see [`GridConfig::new`])
/// - `catalog_file`, if set, must exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Default grid size
    #[serde(default)]
    pub grid: GridDefaults,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path (temp file + rename).
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        self.default_grid()?;

        if let Some(catalog_file) = &self.paths.catalog_file {
            if !catalog_file.exists() {
                anyhow::bail!("Catalog file does not exist: {}", catalog_file.display());
            }
        }

        Ok(())
    }

    /// Directory for saved configurator state.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("data")),
        }
    }

    /// Grid used for new configurations.
    pub fn default_grid(&self) -> Result<GridConfig> {
        GridConfig::new(self.grid.cells_x, self.grid.cells_z).context("Invalid [grid] defaults")
    }

    /// Built-in catalog, extended by `catalog_file` when configured.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.paths.catalog_file {
            Some(path) => Catalog::load_with_extension(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.ui.show_help_on_startup);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert_eq!(config.default_grid().unwrap(), GridConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_grid() {
        let mut config = Config::new();
        config.grid.cells_x = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_catalog_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.paths.catalog_file = Some(temp_dir.path().join("missing.json5"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.grid.cells_x = 12;
        config.ui.theme_mode = ThemeMode::Dark;
        config.paths.data_dir = Some(temp_dir.path().join("data"));
        config.save_to(&config_file).unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
        assert!(!config_file.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_config_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[ui]\ntheme_mode = \"Light\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.ui.theme_mode, ThemeMode::Light);
        assert!(loaded.ui.show_help_on_startup);
        assert_eq!(loaded.grid, GridDefaults::default());
    }

    #[test]
    fn test_theme_mode_parsing() {
        assert_eq!("auto".parse::<ThemeMode>().unwrap(), ThemeMode::Auto);
        assert_eq!("LIGHT".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_catalog_with_extension_file() {
        let temp_dir = TempDir::new().unwrap();
        let catalog_file = temp_dir.path().join("catalog.json5");
        fs::write(
            &catalog_file,
            r#"{ modules: [ { id: "sauna-1x1", name: "Sauna", category: "service",
                footprint: { cellsX: 1, cellsZ: 1 }, basePrice: 12000 } ] }"#,
        )
        .unwrap();

        let mut config = Config::new();
        config.paths.catalog_file = Some(catalog_file);
        let catalog = config.catalog().unwrap();
        assert!(catalog.find_module("sauna-1x1").is_some());
        assert!(catalog.find_module("kitchen-2x2").is_some());
    }
}
