//! Module instances placed on the grid.

use crate::models::GridCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Quarter-turn rotation of a placed module.
///
/// Serialized as the integer number of degrees (0, 90, 180 or 270).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    /// No rotation
    #[default]
    Deg0,
    /// Quarter turn
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turns
    Deg270,
}

impl Rotation {
    /// Rotation in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Parses a degree value; only exact quarter turns are accepted.
    #[must_use]
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Advances by +90° modulo 360.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Whether this rotation exchanges the footprint axes.
    #[must_use]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(value)
            .ok_or_else(|| format!("rotation must be 0, 90, 180 or 270 (got {value})"))
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A module instance on the grid.
///
/// The preset is referenced by id and resolved on demand; the instance never
/// embeds the preset itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedModule {
    /// Unique instance identifier
    pub instance_id: String,
    /// Catalog preset this instance was created from
    pub preset_id: String,
    /// Anchor column (top-left cell)
    pub grid_x: i32,
    /// Anchor row (top-left cell)
    pub grid_z: i32,
    /// Current rotation
    pub rotation: Rotation,
}

impl PlacedModule {
    /// Creates an unrotated instance with a freshly generated id.
    pub fn new(preset_id: impl Into<String>, grid_x: i32, grid_z: i32) -> Self {
        Self {
            instance_id: generate_instance_id(),
            preset_id: preset_id.into(),
            grid_x,
            grid_z,
            rotation: Rotation::Deg0,
        }
    }

    /// Anchor cell of this instance.
    #[must_use]
    pub const fn anchor(&self) -> GridCell {
        GridCell::new(self.grid_x, self.grid_z)
    }
}

/// Generates a new unique instance identifier.
#[must_use]
pub fn generate_instance_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycles_back() {
        let mut rotation = Rotation::Deg0;
        for _ in 0..4 {
            rotation = rotation.next();
        }
        assert_eq!(rotation, Rotation::Deg0);
        assert!(Rotation::Deg90.swaps_axes());
        assert!(!Rotation::Deg180.swaps_axes());
    }

    #[test]
    fn test_rotation_serde_as_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::Deg270).unwrap(), "270");
        let parsed: Rotation = serde_json::from_str("90").unwrap();
        assert_eq!(parsed, Rotation::Deg90);
        assert!(serde_json::from_str::<Rotation>("45").is_err());
    }

    #[test]
    fn test_placed_module_ids_are_unique() {
        let a = PlacedModule::new("kitchen", 0, 0);
        let b = PlacedModule::new("kitchen", 0, 0);
        assert_ne!(a.instance_id, b.instance_id);
        assert_eq!(a.rotation, Rotation::Deg0);
        assert_eq!(a.anchor(), GridCell::new(0, 0));
    }

    #[test]
    fn test_placed_module_serializes_camel_case() {
        let module = PlacedModule {
            instance_id: "abc".to_string(),
            preset_id: "kitchen".to_string(),
            grid_x: 2,
            grid_z: 3,
            rotation: Rotation::Deg90,
        };
        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["instanceId"], "abc");
        assert_eq!(json["presetId"], "kitchen");
        assert_eq!(json["gridX"], 2);
        assert_eq!(json["gridZ"], 3);
        assert_eq!(json["rotation"], 90);
    }
}
