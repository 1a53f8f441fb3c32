//! Export of configurations.
//!
//! Everything here is a pure function of the state plus the catalog, except
//! [`write_bundle`] which writes a zip archive:
//!
//! - [`to_document`] builds the versioned JSON document
//! - [`to_summary_text`] renders the clipboard-friendly report
//! - [`render_plan_diagram`] and [`to_markdown`] render text plans
//! - [`SnapshotRequest`] asks the renderer for an image capture

pub mod bundle;
pub mod document;
pub mod markdown;
pub mod plan_diagram;
pub mod snapshot;
pub mod summary;

pub use bundle::write_bundle;
pub use document::{to_document, ExportDocument, ExportedModule, ModulePosition};
pub use markdown::to_markdown;
pub use plan_diagram::render_plan_diagram;
pub use snapshot::SnapshotRequest;
pub use summary::{format_price, to_summary_text};
