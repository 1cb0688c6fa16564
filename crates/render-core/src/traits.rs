use crate::error::RenderError;
use crate::model::ReportModel;
use visit_report_traits::PhotoRepository;
use visit_report_types::ExportFormat;

/// One output format for a resolved report.
///
/// Implementations draw exactly what the model says: labels, captions and
/// slot geometry are already decided. Photo bytes are fetched through the
/// repository handed in for this call, and a photo that cannot be loaded is
/// replaced by its placeholder instead of failing the render.
pub trait ReportRenderer: Send {
    fn format(&self) -> ExportFormat;

    fn render(
        &mut self,
        model: &ReportModel<'_>,
        photos: &dyn PhotoRepository,
    ) -> Result<Vec<u8>, RenderError>;
}
