// src/export/mod.rs
mod builder;
mod coordinator;
mod filename;

pub use builder::ExporterBuilder;
pub use coordinator::{ExportedDocument, ReportExporter, renderer_for};
pub use filename::{report_filename, sanitize_component};
