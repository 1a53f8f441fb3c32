//! Markdown report combining the plan diagram, module table and totals.

use std::fmt::Write as _;

use crate::catalog::Catalog;
use crate::constants::APP_NAME;
use crate::engine::effective_footprint;
use crate::models::ConfiguratorState;

use super::document::ExportDocument;
use super::plan_diagram::{module_key, render_plan_diagram};
use super::summary::{format_meters, format_price};

/// Generates a markdown document for sharing a configuration.
///
/// `document` must have been built from `state`; the diagram keys in the
/// module table follow the document's module order.
#[must_use]
pub fn to_markdown(document: &ExportDocument, state: &ConfiguratorState, catalog: &Catalog) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {APP_NAME} configuration\n");
    let _ = writeln!(
        output,
        "_Generated {} · schema {}_\n",
        document.timestamp.format("%Y-%m-%d %H:%M UTC"),
        document.version
    );

    output.push_str("## Plan\n\n```text\n");
    output.push_str(&render_plan_diagram(state, catalog));
    output.push_str("```\n\n");

    output.push_str("## Modules\n\n");
    if document.modules.is_empty() {
        output.push_str("No modules placed.\n\n");
    } else {
        output.push_str("| Key | Module | Category | Size | Position | Rotation | Price |\n");
        output.push_str("|-----|--------|----------|------|----------|----------|------:|\n");
        for (index, module) in document.modules.iter().enumerate() {
            let preset = &module.preset;
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | ({}, {}) | {} | {} |",
                module_key(index),
                preset.name,
                preset.category,
                effective_footprint(preset.footprint, module.rotation),
                module.position.grid_x,
                module.position.grid_z,
                module.rotation,
                format_price(preset.base_price),
            );
        }
        output.push('\n');
    }

    output.push_str("## Summary\n\n");
    let _ = writeln!(
        output,
        "- **Grid:** {} x {} cells",
        document.grid_size.cells_x, document.grid_size.cells_z
    );
    let _ = writeln!(output, "- **Modules:** {}", document.summary.module_count);
    let _ = writeln!(
        output,
        "- **Total area:** {} m²",
        format_meters(document.summary.total_square_meters)
    );
    let _ = writeln!(
        output,
        "- **Total price:** {}",
        format_price(document.summary.total_price)
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_document;
    use crate::models::{GridConfig, PlacedModule};
    use chrono::Utc;

    #[test]
    fn test_markdown_sections() {
        let catalog = Catalog::builtin();
        let mut state = ConfiguratorState::new(GridConfig::new(6, 4).unwrap());
        state.placed_modules.push(PlacedModule::new("kitchen-2x2", 1, 1));
        let document = to_document(&state, &catalog, Utc::now());

        let markdown = to_markdown(&document, &state, &catalog);
        assert!(markdown.starts_with("# Prefab Planner configuration"));
        assert!(markdown.contains("## Plan\n\n```text\n"));
        assert!(markdown.contains("| A | Kitchen | Living | 2x2 | (1, 1) | 0° | € 36.000 |"));
        assert!(markdown.contains("- **Total area:** 36 m²"));
    }

    #[test]
    fn test_markdown_without_modules() {
        let catalog = Catalog::builtin();
        let state = ConfiguratorState::default();
        let document = to_document(&state, &catalog, Utc::now());
        assert!(to_markdown(&document, &state, &catalog).contains("No modules placed."));
    }
}
