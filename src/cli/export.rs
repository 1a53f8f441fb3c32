//! Export command: JSON document, markdown report or zip bundle.

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::constants::APP_BINARY_NAME;
use crate::export::{to_document, to_markdown, write_bundle};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Versioned JSON document
    Json,
    /// Markdown report with a plan diagram
    Markdown,
    /// Zip archive with JSON, text summary and markdown
    Bundle,
}

impl ExportFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Bundle => "zip",
        }
    }
}

/// Export the current configuration
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output path (defaults to prefab-planner-export-[date].[ext])
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let now = Utc::now();
        let document = to_document(store.state(), store.catalog(), now);
        let output_path = self.get_output_path(now);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::io(format!(
                    "Failed to create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        match self.format {
            ExportFormat::Json => {
                let json = document
                    .to_json_pretty()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                write_text(&output_path, &json)?;
            }
            ExportFormat::Markdown => {
                let markdown = to_markdown(&document, store.state(), store.catalog());
                write_text(&output_path, &markdown)?;
            }
            ExportFormat::Bundle => {
                write_bundle(&output_path, &document, store.state(), store.catalog())
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
            }
        }

        println!(
            "Exported {} module(s) to {}",
            document.modules.len(),
            output_path.display()
        );
        Ok(())
    }

    fn get_output_path(&self, now: DateTime<Utc>) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{APP_BINARY_NAME}-export-{}.{}",
                now.format("%Y%m%d"),
                self.format.extension()
            ))
        })
    }
}

fn write_text(path: &Path, content: &str) -> CliResult<()> {
    fs::write(path, content)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))
}
