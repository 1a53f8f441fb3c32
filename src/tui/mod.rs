//! Terminal user interface: a 2D driver for the configurator store.
//!
//! This module contains the main TUI loop, `AppState`, and the widgets. The
//! grid is drawn two terminal columns per cell; [`viewport::GridViewport`]
//! maps mouse positions back to grid cells so the store receives the same
//! `update_preview` / `start_drag` / `stop_drag` commands a 3D viewport
//! would send.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]

pub mod catalog_panel;
pub mod grid_widget;
pub mod handlers;
pub mod help_overlay;
pub mod status_bar;
pub mod theme;
pub mod viewport;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{APP_NAME, CELL_SIZE_METERS};
use crate::export::summary::format_meters;
use crate::models::{GridCell, InteractionMode, ModulePreset};
use crate::store::ConfiguratorStore;

pub use catalog_panel::CatalogPanel;
pub use grid_widget::GridWidget;
pub use help_overlay::HelpOverlayState;
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use viewport::GridViewport;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Preset list
    Catalog,
    /// Placement grid
    Grid,
}

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar
    pub title: Rect,
    /// Catalog panel (preset list + metrics)
    pub catalog: Rect,
    /// Grid panel including its border
    pub grid: Rect,
    /// Status bar
    pub status: Rect,
}

impl ScreenAreas {
    /// Splits the full terminal area.
    #[must_use]
    pub fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(8),    // Main content
                Constraint::Length(5), // Status bar
            ])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(10)])
            .split(rows[1]);

        Self {
            title: rows[0],
            catalog: columns[0],
            grid: columns[1],
            status: rows[2],
        }
    }
}

/// Application state for the TUI.
pub struct AppState {
    /// The configurator (single writer of the state)
    pub store: ConfiguratorStore,
    /// Active color theme
    pub theme: Theme,
    /// Where snapshots and exports are written
    pub data_dir: PathBuf,
    /// Panel receiving navigation keys
    pub focus: Focus,
    /// Highlighted row of the preset list
    pub catalog_cursor: usize,
    /// Keyboard cursor on the grid
    pub cursor: GridCell,
    /// Visible window onto the grid
    pub viewport: GridViewport,
    /// Preset list area of the last frame (for mouse hits)
    pub catalog_list_area: Rect,
    /// Offset of the pointer from the dragged module's anchor
    pub grab_offset: (i32, i32),
    /// Next starter layout loaded by `L`
    pub starter_cursor: usize,
    /// Help overlay, when open
    pub help: Option<HelpOverlayState>,
    /// Status message
    pub status_message: String,
    /// Error message shown as an overlay
    pub error_message: Option<String>,
    seen_reset_trigger: u64,
}

impl AppState {
    /// Creates the TUI state around an opened store.
    #[must_use]
    pub fn new(store: ConfiguratorStore, config: &Config, data_dir: PathBuf) -> Self {
        let seen_reset_trigger = store.state().reset_view_trigger;
        Self {
            store,
            theme: Theme::from_mode(config.ui.theme_mode),
            data_dir,
            focus: Focus::Catalog,
            catalog_cursor: 0,
            cursor: GridCell::new(0, 0),
            viewport: GridViewport::default(),
            catalog_list_area: Rect::default(),
            grab_offset: (0, 0),
            starter_cursor: 0,
            help: config.ui.show_help_on_startup.then(HelpOverlayState::new),
            status_message: String::new(),
            error_message: None,
            seen_reset_trigger,
        }
    }

    /// Sets the status message (clears any error).
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Shows an error overlay.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Presets in display order: grouped by category, catalog order within.
    #[must_use]
    pub fn presets(&self) -> Vec<&ModulePreset> {
        let catalog = self.store.catalog();
        crate::models::ModuleCategory::all()
            .iter()
            .flat_map(|category| catalog.modules_in(*category))
            .collect()
    }

    /// Preset under the catalog cursor.
    #[must_use]
    pub fn highlighted_preset(&self) -> Option<&ModulePreset> {
        self.presets().get(self.catalog_cursor).copied()
    }

    /// Instance covering `cell`, if any.
    #[must_use]
    pub fn module_at(&self, cell: GridCell) -> Option<String> {
        self.store
            .occupied_index()
            .owner(cell)
            .map(str::to_string)
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.store.state().interaction.mode()
    }

    /// Moves the grid cursor, clamped to the grid, and refreshes the preview.
    pub fn move_cursor(&mut self, dx: i32, dz: i32) {
        self.cursor = self.clamp_to_grid(self.cursor.offset(dx, dz));
        self.viewport.scroll_to_include(self.cursor);
        self.refresh_preview();
    }

    /// Sends the cursor (minus any grab offset) as the preview anchor.
    pub fn refresh_preview(&mut self) {
        let anchor = match self.mode() {
            InteractionMode::Idle => return,
            InteractionMode::PresetArmed => self.cursor,
            InteractionMode::Dragging => self.cursor.offset(-self.grab_offset.0, -self.grab_offset.1),
        };
        self.store.update_preview(Some(anchor));
    }

    fn clamp_to_grid(&self, cell: GridCell) -> GridCell {
        let grid = self.store.state().grid;
        let max_x = i32::try_from(grid.cells_x).unwrap_or(i32::MAX) - 1;
        let max_z = i32::try_from(grid.cells_z).unwrap_or(i32::MAX) - 1;
        GridCell::new(cell.x.clamp(0, max_x), cell.z.clamp(0, max_z))
    }

    /// Recomputes the grid viewport for a terminal of the given size.
    ///
    /// A bumped `reset_view_trigger` scrolls back to the grid origin.
    pub fn sync_viewport(&mut self, area: Rect) {
        let areas = ScreenAreas::split(area);
        self.viewport.area = Block::default().borders(Borders::ALL).inner(areas.grid);
        self.catalog_list_area = CatalogPanel::list_area(areas.catalog);

        let trigger = self.store.state().reset_view_trigger;
        if trigger != self.seen_reset_trigger {
            self.seen_reset_trigger = trigger;
            self.viewport.scroll = GridCell::new(0, 0);
            self.cursor = GridCell::new(0, 0);
        }
        self.cursor = self.clamp_to_grid(self.cursor);
        self.viewport.scroll_to_include(self.cursor);
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        let size = terminal.size().context("Failed to read terminal size")?;
        state.sync_viewport(Rect::new(0, 0, size.width, size.height));

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handlers::handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => handlers::handle_mouse_event(state, mouse)?,
                // Resize and focus changes re-render on the next loop
                _ => {}
            }
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let areas = ScreenAreas::split(f.area());

    render_title_bar(f, areas.title, state);
    CatalogPanel::render(f, areas.catalog, state);
    GridWidget::render(f, areas.grid, state);
    StatusBar::render(f, areas.status, state, &state.theme);

    if let Some(help) = &state.help {
        help.render(f, f.area(), &state.theme);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with grid size and change counter
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let grid = state.store.state().grid;
    let title = format!(
        " {APP_NAME} - grid {grid} ({} m × {} m) - {} change(s)",
        format_meters(f64::from(grid.cells_x) * CELL_SIZE_METERS),
        format_meters(f64::from(grid.cells_z) * CELL_SIZE_METERS),
        state.store.version()
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(60, 25, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to dismiss",
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error)),
        );
    f.render_widget(paragraph, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
