//! Zip bundle with every export format.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::catalog::Catalog;
use crate::models::ConfiguratorState;

use super::document::ExportDocument;
use super::markdown::to_markdown;
use super::summary::to_summary_text;

/// Entries written into every bundle, in order.
pub const BUNDLE_ENTRIES: [&str; 3] = ["configuration.json", "summary.txt", "plan.md"];

/// Writes a zip archive containing the JSON document, the text summary and
/// the markdown report.
pub fn write_bundle(
    path: &Path,
    document: &ExportDocument,
    state: &ConfiguratorState,
    catalog: &Catalog,
) -> Result<()> {
    let json = document.to_json_pretty()?;
    let summary = to_summary_text(document);
    let markdown = to_markdown(document, state, catalog);
    let contents = [json.as_str(), summary.as_str(), markdown.as_str()];

    let file = File::create(path)
        .with_context(|| format!("Failed to create bundle: {}", path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, content) in BUNDLE_ENTRIES.iter().zip(contents) {
        add_file_to_zip(&mut zip, name, content.as_bytes(), options)?;
    }

    zip.finish()
        .with_context(|| format!("Failed to finalize bundle: {}", path.display()))?;
    Ok(())
}

fn add_file_to_zip(
    zip: &mut ZipWriter<File>,
    name: &str,
    content: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    if name.contains("..") || name.starts_with('/') || name.starts_with('\\') {
        bail!("Invalid filename in bundle: {name}");
    }

    zip.start_file(name, options)
        .with_context(|| format!("Failed to start bundle entry {name}"))?;
    zip.write_all(content)
        .with_context(|| format!("Failed to write bundle entry {name}"))?;
    Ok(())
}
