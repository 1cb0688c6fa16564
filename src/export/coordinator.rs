// src/export/coordinator.rs
use super::builder::ExporterBuilder;
use super::filename::report_filename;
use crate::error::ExportError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use visit_report_render_core::{ReportConfig, ReportModel, ReportRenderer};
use visit_report_render_docx::DocxReportRenderer;
use visit_report_render_lopdf::PdfReportRenderer;
use visit_report_traits::PhotoRepository;
use visit_report_types::{Density, ExportFormat, Visit};

/// The finished file: bytes plus the name it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Writes the document into `dir` under its own filename and returns the full path.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Selects the backend for a format. Each call returns a fresh renderer.
pub fn renderer_for(format: ExportFormat) -> Box<dyn ReportRenderer> {
    match format {
        ExportFormat::Pdf => Box::new(PdfReportRenderer::new()),
        ExportFormat::Docx => Box::new(DocxReportRenderer::new()),
    }
}

/// Entry point for producing report documents.
///
/// Cheap to clone; the configuration and the photo repository are shared.
/// Every export is independent, so one exporter can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    config: Arc<ReportConfig>,
    repository: Arc<dyn PhotoRepository>,
}

impl ReportExporter {
    pub fn new(config: ReportConfig, repository: Arc<dyn PhotoRepository>) -> Self {
        Self {
            config: Arc::new(config),
            repository,
        }
    }

    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn repository(&self) -> &dyn PhotoRepository {
        self.repository.as_ref()
    }

    /// Renders `visit` without checking the identity fields first.
    ///
    /// Missing or undecodable photos never fail the export; they show up as
    /// placeholder text in the document.
    pub fn export(
        &self,
        visit: &Visit,
        format: ExportFormat,
        density: Density,
    ) -> Result<ExportedDocument, ExportError> {
        let model = ReportModel::build(visit, &self.config, density);
        log::debug!(
            "Exporting visit '{}' as {} ({} sections, {} photo pages)",
            visit.id,
            format,
            model.sections.len(),
            model.photo_pages.len()
        );

        let mut renderer = renderer_for(format);
        let bytes = renderer.render(&model, self.repository.as_ref())?;
        let filename = report_filename(&self.config.filename_prefix, visit, format);

        log::info!("Exported {} ({} bytes)", filename, bytes.len());
        Ok(ExportedDocument {
            bytes,
            filename,
            format,
        })
    }

    /// Validates the visit, then renders it.
    pub fn export_document(
        &self,
        visit: &Visit,
        format: ExportFormat,
        density: Density,
    ) -> Result<ExportedDocument, ExportError> {
        visit.validate()?;
        self.export(visit, format, density)
    }

    /// [`export_document`](Self::export_document) on the blocking thread pool.
    pub async fn export_async(
        &self,
        visit: Visit,
        format: ExportFormat,
        density: Density,
    ) -> Result<ExportedDocument, ExportError> {
        let exporter = self.clone();
        tokio::task::spawn_blocking(move || exporter.export_document(&visit, format, density))
            .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use visit_report_traits::InMemoryPhotoRepository;
    use visit_report_types::{Outline, ValidationError};

    fn exporter() -> ReportExporter {
        ReportExporter::new(
            ReportConfig::default(),
            Arc::new(InMemoryPhotoRepository::new()),
        )
    }

    fn visit() -> Visit {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut visit = Visit::new("Acme", "North Yard", "P-100", date, "J. Doe");
        visit.background = "Routine inspection.".to_string();
        visit.observations = Outline::from_stored("Gate is damaged\nFence leaning");
        visit
    }

    #[test]
    fn renderer_matches_the_format() {
        assert_eq!(renderer_for(ExportFormat::Pdf).format(), ExportFormat::Pdf);
        assert_eq!(renderer_for(ExportFormat::Docx).format(), ExportFormat::Docx);
    }

    #[test]
    fn pdf_export_is_named_and_tagged() {
        let document = exporter()
            .export(&visit(), ExportFormat::Pdf, Density::Six)
            .unwrap();
        assert_eq!(document.filename, "Site_Visit_Report_Acme_NorthYard_20240601.pdf");
        assert_eq!(document.content_type(), "application/pdf");
        assert!(document.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn docx_export_is_a_zip() {
        let document = exporter()
            .export(&visit(), ExportFormat::Docx, Density::Two)
            .unwrap();
        assert!(document.filename.ends_with(".docx"));
        assert!(document.bytes.starts_with(b"PK"));
    }

    #[test]
    fn export_document_rejects_missing_identity_fields() {
        let mut visit = visit();
        visit.client_name = "  ".to_string();
        let err = exporter()
            .export_document(&visit, ExportFormat::Pdf, Density::Six)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::InvalidVisit(ValidationError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn async_export_matches_sync_naming() {
        let exporter = exporter();
        let document = exporter
            .export_async(visit(), ExportFormat::Docx, Density::Six)
            .await
            .unwrap();
        assert_eq!(document.filename, "Site_Visit_Report_Acme_NorthYard_20240601.docx");
    }

    #[test]
    fn write_to_dir_uses_the_filename() {
        let dir = tempfile::tempdir().unwrap();
        let document = exporter()
            .export(&visit(), ExportFormat::Pdf, Density::Six)
            .unwrap();
        let path = document.write_to_dir(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), document.filename.as_str());
        assert_eq!(std::fs::read(path).unwrap(), document.bytes);
    }
}
