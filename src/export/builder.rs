// src/export/builder.rs
use super::coordinator::ReportExporter;
use crate::error::ExportError;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use visit_report_render_core::ReportConfig;
use visit_report_traits::PhotoRepository;

/// A builder for creating a [`ReportExporter`].
#[derive(Default)]
pub struct ExporterBuilder {
    config: ReportConfig,
    repository: Option<Arc<dyn PhotoRepository>>,
}

impl ExporterBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads a camelCase JSON configuration file. Missing keys keep their defaults.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ExportError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            ExportError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.config = serde_json::from_str(&source)?;
        Ok(self)
    }

    pub fn with_repository<R: PhotoRepository + 'static>(mut self, repository: R) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    pub fn with_shared_repository(mut self, repository: Arc<dyn PhotoRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Consumes the builder. Fails when no repository was given or the page
    /// geometry leaves no room for content.
    pub fn build(self) -> Result<ReportExporter, ExportError> {
        let repository = self.repository.ok_or_else(|| {
            ExportError::Config(
                "No photo repository has been configured. Use `with_repository`.".to_string(),
            )
        })?;

        let page = &self.config.page;
        if page.content_width() <= 0.0 {
            return Err(ExportError::Config(format!(
                "Page width {} leaves no content width with margin {}",
                page.width, page.margin
            )));
        }
        if page.content_bottom() <= page.continuation_top
            || page.content_bottom() <= page.photo_grid_top
        {
            return Err(ExportError::Config(format!(
                "Page height {} leaves no room below the top offsets",
                page.height
            )));
        }

        Ok(ReportExporter::new(self.config, repository))
    }
}
