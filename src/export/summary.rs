//! Plain-text configuration summary, suitable for the clipboard.

use std::fmt::Write as _;

use crate::constants::{APP_NAME, CELL_SIZE_METERS};
use crate::engine::effective_footprint;

use super::document::ExportDocument;

/// Renders a line-oriented report of an export document.
///
/// # Example
///
/// ```text
/// Prefab Planner configuration
/// Generated: 2026-03-14 09:30 UTC
/// Grid: 20 x 20 cells (60 x 60 m)
///
/// Modules (2):
///   1. Living room [Living] 3x2 at (0, 0), 0° - € 42.000
///   2. Bathroom [Service] 2x1 at (3, 0), 90° - € 21.000
///
/// Total area: 72 m²
/// Total price: € 63.000
/// ```
#[must_use]
pub fn to_summary_text(document: &ExportDocument) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{APP_NAME} configuration");
    let _ = writeln!(
        output,
        "Generated: {}",
        document.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    let grid = document.grid_size;
    let _ = writeln!(
        output,
        "Grid: {} x {} cells ({} x {} m)",
        grid.cells_x,
        grid.cells_z,
        format_meters(f64::from(grid.cells_x) * CELL_SIZE_METERS),
        format_meters(f64::from(grid.cells_z) * CELL_SIZE_METERS),
    );
    output.push('\n');

    if document.modules.is_empty() {
        output.push_str("Modules: none\n");
    } else {
        let _ = writeln!(output, "Modules ({}):", document.modules.len());
        for (index, module) in document.modules.iter().enumerate() {
            let preset = &module.preset;
            let _ = writeln!(
                output,
                "  {}. {} [{}] {} at ({}, {}), {} - {}",
                index + 1,
                preset.name,
                preset.category,
                effective_footprint(preset.footprint, module.rotation),
                module.position.grid_x,
                module.position.grid_z,
                module.rotation,
                format_price(preset.base_price),
            );
        }
    }

    let unresolved = document
        .summary
        .module_count
        .saturating_sub(document.modules.len());
    if unresolved > 0 {
        let _ = writeln!(
            output,
            "  ({unresolved} module(s) reference presets no longer in the catalog)"
        );
    }
    output.push('\n');

    let _ = writeln!(
        output,
        "Total area: {} m²",
        format_meters(document.summary.total_square_meters)
    );
    let _ = writeln!(
        output,
        "Total price: {}",
        format_price(document.summary.total_price)
    );

    output
}

/// Formats a price in euro with dot thousands separators ("€ 42.000").
#[must_use]
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("€ {grouped}")
}

/// Formats a length or area without a trailing ".0" for whole numbers.
#[must_use]
pub fn format_meters(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::export::to_document;
    use crate::models::{ConfiguratorState, PlacedModule, Rotation};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "€ 0");
        assert_eq!(format_price(950), "€ 950");
        assert_eq!(format_price(42_000), "€ 42.000");
        assert_eq!(format_price(1_234_567), "€ 1.234.567");
    }

    #[test]
    fn test_format_meters() {
        assert_eq!(format_meters(54.0), "54");
        assert_eq!(format_meters(13.5), "13.5");
    }

    #[test]
    fn test_summary_lists_modules_and_totals() {
        let mut state = ConfiguratorState::default();
        state.placed_modules.push(PlacedModule::new("living-3x2", 0, 0));
        let mut bathroom = PlacedModule::new("bathroom-1x2", 3, 0);
        bathroom.rotation = Rotation::Deg90;
        state.placed_modules.push(bathroom);

        let timestamp = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let text = to_summary_text(&to_document(&state, &Catalog::builtin(), timestamp));

        assert!(text.starts_with("Prefab Planner configuration\n"));
        assert!(text.contains("Generated: 2026-03-14 09:30 UTC"));
        assert!(text.contains("Grid: 20 x 20 cells (60 x 60 m)"));
        assert!(text.contains("1. Living room [Living] 3x2 at (0, 0), 0° - € 42.000"));
        assert!(text.contains("2. Bathroom [Service] 2x1 at (3, 0), 90° - € 21.000"));
        assert!(text.contains("Total area: 72 m²"));
        assert!(text.contains("Total price: € 63.000"));
    }

    #[test]
    fn test_summary_of_empty_configuration() {
        let document = to_document(
            &ConfiguratorState::default(),
            &Catalog::builtin(),
            Utc::now(),
        );
        let text = to_summary_text(&document);
        assert!(text.contains("Modules: none"));
        assert!(text.contains("Total price: € 0"));
    }
}
