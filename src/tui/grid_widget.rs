//! Grid widget: placed modules, the ghost preview and the cursor.

use std::collections::{HashMap, HashSet};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Focus};
use crate::engine::{cells_covered, module_footprint};
use crate::export::plan_diagram::module_key;
use crate::models::{GridCell, ModuleCategory};

/// Grid widget renders the placement lattice
pub struct GridWidget;

impl GridWidget {
    /// Render the grid widget
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let store = &state.store;
        let configurator = store.state();
        let catalog = store.catalog();
        let selected = configurator.selected_module_id.as_deref();
        let dragging = configurator.interaction.dragging_instance_id.as_deref();
        let conflicts: HashSet<String> = store.conflicts().into_iter().collect();

        // Key and category of every resolved module, in placement order
        let labels: HashMap<&str, (char, ModuleCategory)> = configurator
            .placed_modules
            .iter()
            .filter_map(|m| catalog.find_module(&m.preset_id).map(|p| (m, p.category)))
            .enumerate()
            .map(|(i, (m, category))| (m.instance_id.as_str(), (module_key(i), category)))
            .collect();
        let index = store.occupied_index();

        let ghost = store.ghost();
        let ghost_cells: HashSet<GridCell> = ghost
            .as_ref()
            .map(|g| cells_covered(g.anchor.x, g.anchor.z, g.footprint).collect())
            .unwrap_or_default();
        let ghost_color = match &ghost {
            Some(g) if g.is_valid => theme.success,
            _ => theme.error,
        };

        // Cells of modules left overlapping by an unchecked rotation
        let conflict_cells: HashSet<GridCell> = configurator
            .placed_modules
            .iter()
            .filter(|m| conflicts.contains(&m.instance_id))
            .filter_map(|m| {
                module_footprint(m, catalog).map(|fp| cells_covered(m.grid_x, m.grid_z, fp))
            })
            .flatten()
            .collect();

        let (cols, rows) = state.viewport.visible_cells();
        let grid = configurator.grid;
        let mut lines: Vec<Line> = Vec::with_capacity(rows as usize);

        for dz in 0..i32::from(rows) {
            let mut spans: Vec<Span> = Vec::with_capacity(cols as usize);
            for dx in 0..i32::from(cols) {
                let cell = state.viewport.scroll.offset(dx, dz);
                if !grid.contains(cell) {
                    break;
                }

                let owner = index.owner(cell);
                let (text, mut style) = if ghost_cells.contains(&cell) {
                    ("░░".to_string(), Style::default().fg(ghost_color))
                } else if let Some(owner) = owner {
                    let (key, category) = labels
                        .get(owner)
                        .copied()
                        .unwrap_or(('?', ModuleCategory::Living));
                    let mut style = Style::default().fg(theme.category(category));
                    if Some(owner) == dragging {
                        style = style.fg(theme.text_muted);
                    }
                    if Some(owner) == selected {
                        style = style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD);
                    }
                    (format!("{key}{key}"), style)
                } else {
                    ("· ".to_string(), Style::default().fg(theme.text_muted))
                };

                if conflict_cells.contains(&cell) && !ghost_cells.contains(&cell) {
                    style = style.fg(theme.error).add_modifier(Modifier::UNDERLINED);
                }
                if state.focus == Focus::Grid && cell == state.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(text, style));
            }
            lines.push(Line::from(spans));
        }

        let border_color = if state.focus == Focus::Grid {
            theme.accent
        } else {
            theme.primary
        };
        let title = match &ghost {
            Some(g) if g.is_valid => format!(" Grid - drop at {} ", g.anchor),
            Some(g) => format!(" Grid - cannot place at {} ", g.anchor),
            None => " Grid ".to_string(),
        };

        let widget = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        f.render_widget(widget, area);
    }
}
