//! Summary command: area, price and the text report.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::export::{to_document, to_summary_text};
use chrono::Utc;
use clap::Args;

/// Print the configuration summary
#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    /// Output the metrics as JSON
    #[arg(long)]
    pub json: bool,

    /// Also copy the text summary to the system clipboard
    #[arg(long)]
    pub copy: bool,
}

impl SummaryArgs {
    /// Execute the summary command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;

        if self.json {
            return print_json(&store.metrics());
        }

        let document = to_document(store.state(), store.catalog(), Utc::now());
        let text = to_summary_text(&document);
        print!("{text}");

        if self.copy {
            arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(text))
                .map_err(|e| CliError::io(format!("Failed to copy to clipboard: {e}")))?;
            eprintln!("Summary copied to clipboard");
        }
        Ok(())
    }
}
