//! Catalog panel: the preset list and the live metrics.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{AppState, Focus};
use crate::export::format_price;
use crate::export::summary::format_meters;

/// Height of the metrics box below the preset list.
const METRICS_HEIGHT: u16 = 5;

/// Preset list with metrics underneath
pub struct CatalogPanel;

impl CatalogPanel {
    fn split(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(METRICS_HEIGHT)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Area of the list rows (inside the border), used for mouse hits.
    #[must_use]
    pub fn list_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(Self::split(area).0)
    }

    /// Preset row under a terminal position.
    #[must_use]
    pub fn row_at(list_area: Rect, column: u16, row: u16) -> Option<usize> {
        let inside = column >= list_area.x
            && column < list_area.x + list_area.width
            && row >= list_area.y
            && row < list_area.y + list_area.height;
        inside.then(|| usize::from(row - list_area.y))
    }

    /// Render the panel
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let (list_rect, metrics_rect) = Self::split(area);
        let armed = state.store.state().interaction.selected_preset_id.as_deref();

        let items: Vec<ListItem> = state
            .presets()
            .into_iter()
            .map(|preset| {
                let marker = if armed == Some(preset.id.as_str()) { "▶" } else { " " };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker} "), Style::default().fg(theme.accent)),
                    Span::styled("■ ", Style::default().fg(theme.category(preset.category))),
                    Span::styled(
                        format!("{:<14}", preset.name),
                        Style::default().fg(theme.text),
                    ),
                    Span::styled(
                        format!("{:<4}", preset.footprint.to_string()),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::styled(
                        format!("{:>10}", format_price(preset.base_price)),
                        Style::default().fg(theme.text),
                    ),
                ]))
            })
            .collect();

        let border_color = if state.focus == Focus::Catalog {
            theme.accent
        } else {
            theme.primary
        };
        let list = List::new(items)
            .style(Style::default().bg(theme.background))
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .title(" Modules ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        let mut list_state = ListState::default().with_selected(Some(state.catalog_cursor));
        f.render_stateful_widget(list, list_rect, &mut list_state);

        let metrics = state.store.metrics();
        let label = Style::default().fg(theme.text_muted);
        let value = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled("Area:    ", label),
                Span::styled(
                    format!("{} m²", format_meters(metrics.total_square_meters)),
                    value,
                ),
            ]),
            Line::from(vec![
                Span::styled("Price:   ", label),
                Span::styled(format_price(metrics.total_price), value),
            ]),
            Line::from(vec![
                Span::styled("Modules: ", label),
                Span::styled(metrics.module_count.to_string(), value),
            ]),
        ];
        let summary = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .title(" Summary ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(summary, metrics_rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_at_maps_inside_list_only() {
        let area = CatalogPanel::list_area(Rect::new(0, 3, 36, 30));
        assert_eq!(area, Rect::new(1, 4, 34, 23));
        assert_eq!(CatalogPanel::row_at(area, 5, 4), Some(0));
        assert_eq!(CatalogPanel::row_at(area, 5, 6), Some(2));
        assert_eq!(CatalogPanel::row_at(area, 0, 6), None);
        assert_eq!(CatalogPanel::row_at(area, 5, 27), None);
    }
}
