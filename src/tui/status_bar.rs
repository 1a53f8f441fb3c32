//! Status bar widget for displaying the interaction mode, messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Focus, Theme};
use crate::models::InteractionMode;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines = vec![Self::mode_line(state, theme)];

        if let Some(error) = &state.error_message {
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.text),
            )));
        }

        lines.push(Self::hints_line(state, theme));

        let status = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    fn mode_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let configurator = state.store.state();
        let catalog = state.store.catalog();
        let interaction = &configurator.interaction;
        let mode = interaction.mode();

        let detail = match mode {
            InteractionMode::Idle => configurator
                .selected_module()
                .and_then(|m| catalog.find_module(&m.preset_id).map(|p| (m, p)))
                .map(|(m, p)| format!("selected {} at {} {}", p.name, m.anchor(), m.rotation))
                .unwrap_or_default(),
            InteractionMode::PresetArmed => interaction
                .selected_preset_id
                .as_deref()
                .and_then(|id| catalog.find_module(id))
                .map(|p| format!("placing {} ({})", p.name, p.footprint))
                .unwrap_or_default(),
            InteractionMode::Dragging => interaction
                .drag_origin
                .map(|origin| format!("moving module from {origin}"))
                .unwrap_or_default(),
        };

        let validity = match (mode, interaction.preview_position) {
            (InteractionMode::Idle, _) | (_, None) => Span::raw(""),
            (_, Some(_)) if interaction.is_valid_position => {
                Span::styled("  ✓ fits", Style::default().fg(theme.success))
            }
            (_, Some(_)) => Span::styled("  ✗ blocked", Style::default().fg(theme.error)),
        };

        let conflicts = state.store.conflicts().len();
        let conflict_span = if conflicts > 0 {
            Span::styled(
                format!("  {conflicts} conflict(s)"),
                Style::default().fg(theme.warning),
            )
        } else {
            Span::raw("")
        };

        Line::from(vec![
            Span::styled(
                mode.to_string().to_uppercase(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  cursor {}  ", state.cursor),
                Style::default().fg(theme.text_muted),
            ),
            Span::styled(detail, Style::default().fg(theme.text)),
            validity,
            conflict_span,
        ])
    }

    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints: &[(&str, &str)] = match (state.focus, state.mode()) {
            (_, InteractionMode::Dragging) => {
                &[("arrows", "move"), ("Enter", "drop"), ("Esc", "cancel")]
            }
            (_, InteractionMode::PresetArmed) => &[
                ("arrows", "aim"),
                ("Enter", "place"),
                ("Esc", "disarm"),
                ("Tab", "catalog"),
            ],
            (Focus::Catalog, InteractionMode::Idle) => &[
                ("↑↓", "choose"),
                ("Enter", "arm"),
                ("Tab", "grid"),
                ("L", "starter"),
                ("y", "copy summary"),
            ],
            (Focus::Grid, InteractionMode::Idle) => &[
                ("Enter", "select"),
                ("m", "move"),
                ("r", "rotate"),
                ("x", "delete"),
                ("Tab", "catalog"),
            ],
        };

        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(*action));
        }
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("?", Style::default().fg(theme.accent)));
        spans.push(Span::raw(": Help"));

        Line::from(spans)
    }
}
