//! Static registry of module presets and starter layouts.
//!
//! The built-in catalog can be extended or overridden by a JSON5 file
//! (`[paths] catalog_file` in the configuration). Entries are merged by id:
//! a file entry with an existing id replaces the built-in one.

pub mod builtin;
pub mod starter;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::{ModuleCategory, ModulePreset};

pub use starter::{starter_problems, StarterLayout, StarterPlacement};

/// Module presets and starter layouts available to the configurator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Module templates
    #[serde(default)]
    pub modules: Vec<ModulePreset>,
    /// Starter layouts
    #[serde(default)]
    pub starters: Vec<StarterLayout>,
}

impl Catalog {
    /// Creates a catalog from explicit entries.
    #[must_use]
    pub fn new(modules: Vec<ModulePreset>, starters: Vec<StarterLayout>) -> Self {
        Self { modules, starters }
    }

    /// The catalog shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin::module_presets(), builtin::starter_layouts())
    }

    /// Looks up a module preset by id.
    #[must_use]
    pub fn find_module(&self, preset_id: &str) -> Option<&ModulePreset> {
        self.modules.iter().find(|p| p.id == preset_id)
    }

    /// Looks up a starter layout by id.
    #[must_use]
    pub fn find_starter(&self, starter_id: &str) -> Option<&StarterLayout> {
        self.starters.iter().find(|s| s.id == starter_id)
    }

    /// Module presets belonging to one category, in catalog order.
    pub fn modules_in(&self, category: ModuleCategory) -> impl Iterator<Item = &ModulePreset> {
        self.modules.iter().filter(move |p| p.category == category)
    }

    /// Merges another catalog into this one, replacing entries with equal ids.
    pub fn merge(&mut self, other: Self) {
        for preset in other.modules {
            if let Some(existing) = self.modules.iter_mut().find(|p| p.id == preset.id) {
                *existing = preset;
            } else {
                self.modules.push(preset);
            }
        }
        for starter in other.starters {
            if let Some(existing) = self.starters.iter_mut().find(|s| s.id == starter.id) {
                *existing = starter;
            } else {
                self.starters.push(starter);
            }
        }
    }

    /// Validates every preset and rejects duplicate ids.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for preset in &self.modules {
            preset.validate()?;
            if !seen.insert(preset.id.as_str()) {
                anyhow::bail!("Duplicate module preset ID '{}'", preset.id);
            }
        }

        let mut seen = HashSet::new();
        for starter in &self.starters {
            if starter.id.is_empty() {
                anyhow::bail!("Starter layout ID cannot be empty");
            }
            if !seen.insert(starter.id.as_str()) {
                anyhow::bail!("Duplicate starter layout ID '{}'", starter.id);
            }
        }

        Ok(())
    }

    /// Parses a catalog from JSON5 text.
    pub fn from_json5(content: &str) -> Result<Self> {
        let catalog: Self = json5::from_str(content).context("Failed to parse catalog JSON5")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads the built-in catalog extended with the given JSON5 file.
    pub fn load_with_extension(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let extension = Self::from_json5(&content)
            .with_context(|| format!("Invalid catalog file: {}", path.display()))?;

        let mut catalog = Self::builtin();
        catalog.merge(extension);
        catalog.validate()?;
        Ok(catalog)
    }
}
