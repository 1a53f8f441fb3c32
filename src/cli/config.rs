//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Default directory for the saved configuration (`--data-dir` overrides it per run)
    #[arg(long, value_name = "DIR")]
    default_data_dir: Option<PathBuf>,

    /// JSON5 file extending the built-in catalog
    #[arg(long, value_name = "FILE")]
    catalog_file: Option<PathBuf>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Default grid width in cells
    #[arg(long, value_name = "CELLS")]
    grid_width: Option<u32>,

    /// Default grid depth in cells
    #[arg(long, value_name = "CELLS")]
    grid_depth: Option<u32>,

    /// Show the help overlay when the TUI starts
    #[arg(long, value_name = "BOOL")]
    help_on_startup: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    paths: PathsOutput,
    grid: GridOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    data_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_file: Option<String>,
}

#[derive(Serialize, Debug)]
struct GridOutput {
    cells_x: u32,
    cells_z: u32,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    show_help_on_startup: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(ctx),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let output = ConfigOutput {
            config_file: Config::config_file_path()
                .ok()
                .map(|p| p.to_string_lossy().to_string()),
            paths: PathsOutput {
                data_dir: ctx.data_dir.to_string_lossy().to_string(),
                catalog_file: ctx
                    .config
                    .paths
                    .catalog_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
            },
            grid: GridOutput {
                cells_x: ctx.config.grid.cells_x,
                cells_z: ctx.config.grid.cells_z,
            },
            ui: UiOutput {
                theme: ctx.config.ui.theme_mode.as_str().to_string(),
                show_help_on_startup: ctx.config.ui.show_help_on_startup,
            },
        };

        if self.json {
            print_json(&output)
        } else {
            output_human_readable(&output);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    const fn is_empty(&self) -> bool {
        self.default_data_dir.is_none()
            && self.catalog_file.is_none()
            && self.theme.is_none()
            && self.grid_width.is_none()
            && self.grid_depth.is_none()
            && self.help_on_startup.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --default-data-dir, --catalog-file, --theme, --grid-width, --grid-depth, or --help-on-startup",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(path) = &self.default_data_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create data directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.data_dir = Some(path.clone());
        }

        if let Some(path) = &self.catalog_file {
            if !path.exists() {
                return Err(CliError::validation(format!(
                    "Catalog file does not exist: {}",
                    path.display()
                )));
            }
            config.paths.catalog_file = Some(path.clone());
            config
                .catalog()
                .map_err(|e| CliError::validation(format!("Invalid catalog file: {e:#}")))?;
        }

        if let Some(theme) = &self.theme {
            config.ui.theme_mode = theme
                .parse::<ThemeMode>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(cells_x) = self.grid_width {
            config.grid.cells_x = cells_x;
        }
        if let Some(cells_z) = self.grid_depth {
            config.grid.cells_z = cells_z;
        }
        if let Some(show) = self.help_on_startup {
            config.ui.show_help_on_startup = show;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    println!("{APP_NAME} Configuration");
    println!("{}", "=".repeat(APP_NAME.len() + 14));
    println!();

    if let Some(file) = &output.config_file {
        println!("File: {file}");
        println!();
    }

    println!("Paths:");
    println!("  Data Directory: {}", output.paths.data_dir);
    match &output.paths.catalog_file {
        Some(file) => println!("  Catalog File: {file}"),
        None => println!("  Catalog File: (built-in catalog only)"),
    }
    println!();

    println!("Grid:");
    println!(
        "  Default Size: {}x{}",
        output.grid.cells_x, output.grid.cells_z
    );
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", output.ui.theme);
    println!("  Help On Startup: {}", output.ui.show_help_on_startup);
    println!();
}
