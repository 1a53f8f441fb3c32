//! Catalog module presets and their footprints.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional group a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    /// Shared day-time spaces (living room, kitchen)
    Living,
    /// Bedrooms and studies
    Private,
    /// Bathrooms, utility rooms, technical spaces
    Service,
}

impl ModuleCategory {
    /// Returns all categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Living, Self::Private, Self::Service]
    }

    /// Human-readable label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Living => "Living",
            Self::Private => "Private",
            Self::Service => "Service",
        }
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Width × depth of a module in grid cells, before rotation.
///
/// # Validation
///
/// - both dimensions must be at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footprint {
    /// Extent along the X axis in cells
    pub cells_x: u32,
    /// Extent along the Z axis in cells
    pub cells_z: u32,
}

impl Footprint {
    /// Creates a new footprint with validation.
    pub fn new(cells_x: u32, cells_z: u32) -> Result<Self> {
        if cells_x == 0 || cells_z == 0 {
            anyhow::bail!("Footprint dimensions must be at least 1x1 (got {cells_x}x{cells_z})");
        }
        Ok(Self { cells_x, cells_z })
    }

    /// Number of cells covered by this footprint.
    #[must_use]
    pub const fn area_cells(self) -> u64 {
        self.cells_x as u64 * self.cells_z as u64
    }

    /// Returns the footprint with both axes exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            cells_x: self.cells_z,
            cells_z: self.cells_x,
        }
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cells_x, self.cells_z)
    }
}

/// Immutable module template defined by the catalog.
///
/// # Validation
///
/// - `id` must be non-empty and contain no whitespace
/// - `name` must be non-empty
/// - footprint dimensions must be at least 1 (enforced by [`Footprint::new`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePreset {
    /// Unique catalog identifier (e.g., "living-3x2")
    pub id: String,
    /// Display name
    pub name: String,
    /// Functional category
    pub category: ModuleCategory,
    /// Unrotated footprint in cells
    pub footprint: Footprint,
    /// Price of one module in whole currency units
    pub base_price: u64,
    /// Short icon identifier used by front ends
    #[serde(default)]
    pub icon: String,
    /// Marketing description
    #[serde(default)]
    pub description: String,
}

impl ModulePreset {
    /// Creates a new preset with validation.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ModuleCategory,
        footprint: Footprint,
        base_price: u64,
    ) -> Result<Self> {
        let preset = Self {
            id: id.into(),
            name: name.into(),
            category,
            footprint,
            base_price,
            icon: String::new(),
            description: String::new(),
        };
        preset.validate()?;
        Ok(preset)
    }

    /// Sets the icon identifier.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validates identifier, name and footprint.
    ///
    /// Presets deserialized from catalog files bypass [`ModulePreset::new`],
    /// so catalog loading calls this explicitly.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            anyhow::bail!("Module preset ID cannot be empty");
        }
        if self.id.chars().any(char::is_whitespace) {
            anyhow::bail!("Module preset ID '{}' cannot contain whitespace", self.id);
        }
        if self.name.is_empty() {
            anyhow::bail!("Module preset '{}' must have a name", self.id);
        }
        Footprint::new(self.footprint.cells_x, self.footprint.cells_z)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_rejects_zero() {
        assert!(Footprint::new(0, 2).is_err());
        assert!(Footprint::new(2, 0).is_err());
        assert!(Footprint::new(1, 1).is_ok());
    }

    #[test]
    fn test_footprint_area_and_swap() {
        let fp = Footprint::new(3, 2).unwrap();
        assert_eq!(fp.area_cells(), 6);
        assert_eq!(fp.swapped(), Footprint::new(2, 3).unwrap());
        assert_eq!(fp.to_string(), "3x2");
    }

    #[test]
    fn test_preset_validation() {
        let fp = Footprint::new(2, 2).unwrap();
        assert!(ModulePreset::new("kitchen", "Kitchen", ModuleCategory::Living, fp, 100).is_ok());
        assert!(ModulePreset::new("", "Kitchen", ModuleCategory::Living, fp, 100).is_err());
        assert!(ModulePreset::new("my kitchen", "Kitchen", ModuleCategory::Living, fp, 100).is_err());
        assert!(ModulePreset::new("kitchen", "", ModuleCategory::Living, fp, 100).is_err());
    }

    #[test]
    fn test_preset_serializes_camel_case() {
        let preset = ModulePreset::new(
            "bath",
            "Bathroom",
            ModuleCategory::Service,
            Footprint::new(1, 2).unwrap(),
            9_500,
        )
        .unwrap();
        let json = serde_json::to_value(&preset).unwrap();
        assert_eq!(json["basePrice"], 9_500);
        assert_eq!(json["category"], "service");
        assert_eq!(json["footprint"]["cellsX"], 1);
        assert_eq!(json["footprint"]["cellsZ"], 2);
    }
}
