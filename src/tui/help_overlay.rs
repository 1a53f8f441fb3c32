//! Help overlay widget showing all keyboard and mouse shortcuts.
//!
//! This module provides a scrollable help overlay accessible via '?' key.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use super::Theme;

/// Shortcut sections: title and (keys, description) rows.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "NAVIGATION",
        &[
            ("Tab", "Switch between module list and grid"),
            ("Arrow Keys / hjkl", "Move the list selection or the grid cursor"),
            ("0", "Recenter the grid view"),
        ],
    ),
    (
        "PLACING",
        &[
            ("Enter (list)", "Arm the highlighted module"),
            ("Enter (grid)", "Place the armed module at the cursor"),
            ("Esc", "Disarm / cancel a move / clear selection"),
            ("Mouse move", "Aim the armed module"),
            ("Left click", "Place the armed module"),
        ],
    ),
    (
        "EDITING",
        &[
            ("Enter (grid)", "Select the module under the cursor"),
            ("m", "Move the selected module with the cursor"),
            ("Left drag", "Move a module with the mouse"),
            ("r / Right click", "Rotate the selected module by 90°"),
            ("x / Delete", "Remove the selected module"),
            ("L", "Load the next starter layout"),
            ("+ / -", "Grow or shrink the grid"),
            ("C", "Remove all modules"),
            ("R", "Reset everything, including the grid size"),
        ],
    ),
    (
        "EXPORT",
        &[
            ("y", "Copy the summary to the clipboard"),
            ("e", "Write the JSON document to the data directory"),
            ("s", "Write a text snapshot of the plan"),
        ],
    ),
    (
        "SYSTEM",
        &[("?", "Toggle this help"), ("q / Ctrl+C", "Quit")],
    ),
];

const KEY_COLUMN_WIDTH: usize = 22;

/// State for the help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlayState {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    /// Total number of content lines
    total_lines: usize,
}

impl HelpOverlayState {
    /// Creates a new help overlay state.
    #[must_use]
    pub fn new() -> Self {
        let total_lines = Self::get_help_content(&Theme::dark()).len();
        Self {
            scroll_offset: 0,
            total_lines,
        }
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    fn get_help_content(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (title, rows) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("═══ {title} ═══"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for (keys, description) in *rows {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{keys:<KEY_COLUMN_WIDTH$}"),
                        Style::default().fg(theme.success),
                    ),
                    Span::styled(*description, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Press '?' to close help • Press ↑↓ to scroll",
            Style::default().fg(theme.text_muted),
        )));
        lines
    }

    /// Render the help overlay as a centered modal.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Calculate centered modal size (60% width, 80% height)
        let width = (area.width * 60) / 100;
        let height = (area.height * 80) / 100;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;

        let modal_area = Rect {
            x: x + area.x,
            y: y + area.y,
            width,
            height,
        };
        frame.render_widget(Clear, modal_area);

        // Create layout for content area and scrollbar
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let content = Self::get_help_content(theme);

        let visible_height = content_area.height.saturating_sub(2) as usize; // Account for borders
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

impl Default for HelpOverlayState {
    fn default() -> Self {
        Self::new()
    }
}
