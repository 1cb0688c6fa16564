//! Site-visit report rendering engine.
//!
//! Turns one [`Visit`] record into a downloadable PDF or DOCX document.
//! The heavy lifting lives in the workspace crates:
//!
//! - `visit-report-layout`: outline numbering, photo page planning, text metrics
//! - `visit-report-render-lopdf`: the PDF backend
//! - `visit-report-render-docx`: the DOCX backend
//!
//! This crate is the coordinator: it builds the shared report model, picks a
//! backend by [`ExportFormat`], and names the resulting file.
//!
//! ```no_run
//! use visit_report::{Density, ExportFormat, ExporterBuilder, InMemoryPhotoRepository, Visit};
//! # fn demo(visit: Visit) -> Result<(), visit_report::ExportError> {
//! let exporter = ExporterBuilder::new()
//!     .with_repository(InMemoryPhotoRepository::new())
//!     .build()?;
//! let document = exporter.export_document(&visit, ExportFormat::Pdf, Density::Six)?;
//! println!("{} ({} bytes)", document.filename, document.bytes.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;

pub use error::ExportError;
pub use export::{ExportedDocument, ExporterBuilder, ReportExporter, renderer_for, report_filename};

pub use visit_report_layout::{Label, ListStyle, ResolvedLine, resolve_outline};
pub use visit_report_render_core::{ReportConfig, ReportModel, ReportRenderer, RenderError};
pub use visit_report_render_docx::DocxReportRenderer;
pub use visit_report_render_lopdf::PdfReportRenderer;
pub use visit_report_resource::FilesystemPhotoRepository;
pub use visit_report_traits::{InMemoryPhotoRepository, PhotoRepository, RepositoryError};
pub use visit_report_types::{
    Density, ExportFormat, Outline, OutlineLine, Photo, PhotoId, ValidationError, Visit, VisitId,
};
