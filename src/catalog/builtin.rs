//! Built-in module presets and starter layouts.

use crate::constants::EMPTY_STARTER_ID;
use crate::models::{Footprint, ModuleCategory, ModulePreset};

use super::{StarterLayout, StarterPlacement};

/// Builds one built-in preset. Dimensions are authored constants, so a zero
/// dimension is clamped to 1 instead of failing.
#[allow(clippy::too_many_arguments)]
fn preset(
    id: &str,
    name: &str,
    category: ModuleCategory,
    cells_x: u32,
    cells_z: u32,
    base_price: u64,
    icon: &str,
    description: &str,
) -> ModulePreset {
    ModulePreset {
        id: id.to_string(),
        name: name.to_string(),
        category,
        footprint: Footprint {
            cells_x: cells_x.max(1),
            cells_z: cells_z.max(1),
        },
        base_price,
        icon: icon.to_string(),
        description: description.to_string(),
    }
}

/// Module presets shipped with the application.
#[must_use]
pub fn module_presets() -> Vec<ModulePreset> {
    vec![
        preset(
            "living-3x2",
            "Living room",
            ModuleCategory::Living,
            3,
            2,
            42_000,
            "sofa",
            "Open-plan living area with full-height glazing",
        ),
        preset(
            "kitchen-2x2",
            "Kitchen",
            ModuleCategory::Living,
            2,
            2,
            36_000,
            "utensils",
            "Fitted kitchen with island and pantry wall",
        ),
        preset(
            "master-3x2",
            "Master bedroom",
            ModuleCategory::Private,
            3,
            2,
            33_000,
            "bed-double",
            "Double bedroom with walk-in wardrobe",
        ),
        preset(
            "bedroom-2x2",
            "Bedroom",
            ModuleCategory::Private,
            2,
            2,
            24_000,
            "bed",
            "Single or children's bedroom",
        ),
        preset(
            "study-1x2",
            "Study",
            ModuleCategory::Private,
            1,
            2,
            14_000,
            "desk",
            "Compact home office",
        ),
        preset(
            "bathroom-1x2",
            "Bathroom",
            ModuleCategory::Service,
            1,
            2,
            21_000,
            "bath",
            "Bathroom with walk-in shower",
        ),
        preset(
            "laundry-1x1",
            "Laundry",
            ModuleCategory::Service,
            1,
            1,
            8_000,
            "washer",
            "Laundry niche with utility sink",
        ),
        preset(
            "technical-1x1",
            "Technical room",
            ModuleCategory::Service,
            1,
            1,
            9_500,
            "cog",
            "Heat pump and electrical panel",
        ),
    ]
}

/// Starter layouts shipped with the application. All fit the default grid.
#[must_use]
pub fn starter_layouts() -> Vec<StarterLayout> {
    vec![
        StarterLayout::new(EMPTY_STARTER_ID, "Empty", "Start from a blank plot", Vec::new()),
        StarterLayout::new(
            "monolocale",
            "Studio",
            "Living room, kitchen and bathroom",
            vec![
                StarterPlacement::new("living-3x2", 0, 0),
                StarterPlacement::new("bathroom-1x2", 3, 0),
                StarterPlacement::new("kitchen-2x2", 0, 2),
            ],
        ),
        StarterLayout::new(
            "bilocale",
            "One bedroom",
            "Studio plus a separate bedroom",
            vec![
                StarterPlacement::new("living-3x2", 0, 0),
                StarterPlacement::new("kitchen-2x2", 3, 0),
                StarterPlacement::new("bedroom-2x2", 0, 2),
                StarterPlacement::new("bathroom-1x2", 2, 2),
            ],
        ),
        StarterLayout::new(
            "famiglia",
            "Family home",
            "Three bedrooms with laundry and technical room",
            vec![
                StarterPlacement::new("living-3x2", 0, 0),
                StarterPlacement::new("kitchen-2x2", 3, 0),
                StarterPlacement::new("bathroom-1x2", 5, 0),
                StarterPlacement::new("laundry-1x1", 6, 0),
                StarterPlacement::new("technical-1x1", 6, 1),
                StarterPlacement::new("master-3x2", 0, 2),
                StarterPlacement::new("bedroom-2x2", 3, 2),
                StarterPlacement::new("bedroom-2x2", 5, 2),
            ],
        ),
    ]
}
