//! Text plan of the grid using box-drawing characters.
//!
//! Every resolved module gets a one-character key (`A`, `B`, ...) in
//! placement order; the same keys are used by the markdown module table.
//!
//! ```text
//!     0 1 2 3 4
//!   ┌───────────┐
//! 0 │ A A A B · │
//! 1 │ A A A B · │
//! 2 │ · · · · · │
//!   └───────────┘
//! ```

use std::fmt::Write as _;

use crate::catalog::Catalog;
use crate::engine::{build_occupied_index, find_conflicts, module_footprint};
use crate::models::{ConfiguratorState, GridCell};

const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const EMPTY_GLYPH: char = '·';
const OVERFLOW_GLYPH: char = '*';

/// Diagram key of the n-th resolved module.
#[must_use]
pub fn module_key(index: usize) -> char {
    KEY_ALPHABET
        .get(index)
        .map_or(OVERFLOW_GLYPH, |byte| char::from(*byte))
}

/// Renders the grid with every module drawn as its key.
///
/// Instance ids listed by the conflict check are appended as a warning
/// block below the frame.
#[must_use]
pub fn render_plan_diagram(state: &ConfiguratorState, catalog: &Catalog) -> String {
    let keys: std::collections::HashMap<&str, char> = state
        .placed_modules
        .iter()
        .filter(|m| module_footprint(m, catalog).is_some())
        .enumerate()
        .map(|(index, module)| (module.instance_id.as_str(), module_key(index)))
        .collect();
    let index = build_occupied_index(&state.placed_modules, catalog, None);

    let width = state.grid.cells_x;
    let depth = state.grid.cells_z;
    let label_width = depth.saturating_sub(1).to_string().len();
    let mut output = String::new();

    // Column ruler, last digit of each column index
    let _ = write!(output, "{:label_width$}  ", "");
    for x in 0..width {
        let _ = write!(output, " {}", x % 10);
    }
    output.push('\n');

    let rule = "─".repeat(width as usize * 2 + 1);
    let _ = writeln!(output, "{:label_width$} ┌{rule}┐", "");

    for z in 0..depth {
        let _ = write!(output, "{z:>label_width$} │");
        for x in 0..width {
            let cell = GridCell::new(to_i32(x), to_i32(z));
            let glyph = index
                .owner(cell)
                .and_then(|owner| keys.get(owner).copied())
                .unwrap_or(EMPTY_GLYPH);
            let _ = write!(output, " {glyph}");
        }
        output.push_str(" │\n");
    }

    let _ = writeln!(output, "{:label_width$} └{rule}┘", "");

    let conflicts = find_conflicts(state, catalog);
    if !conflicts.is_empty() {
        output.push_str("\nConflicts (overlapping or outside the grid):\n");
        for id in &conflicts {
            let key = keys.get(id.as_str()).copied().unwrap_or(OVERFLOW_GLYPH);
            let _ = writeln!(output, "  {key}  {id}");
        }
    }

    output
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
