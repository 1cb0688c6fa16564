use crate::package::write_package;
use crate::tree;
use visit_report_render_core::{RenderError, ReportModel, ReportRenderer};
use visit_report_traits::PhotoRepository;
use visit_report_types::ExportFormat;

/// Renders a report model into a `.docx` package.
#[derive(Debug, Clone, Default)]
pub struct DocxReportRenderer;

impl DocxReportRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for DocxReportRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn render(&mut self, model: &ReportModel<'_>, photos: &dyn PhotoRepository) -> Result<Vec<u8>, RenderError> {
        let tree = tree::build(model, photos);
        let bytes = write_package(&tree, &model.config.page)?;
        log::info!(
            "Rendered DOCX report: {} block(s), {} picture(s), {} bytes",
            tree.blocks.len(),
            tree.media.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ExtendedColorType, ImageEncoder};
    use std::io::{Cursor, Read};
    use visit_report_render_core::ReportConfig;
    use visit_report_traits::InMemoryPhotoRepository;
    use visit_report_types::{Density, Photo, Visit};
    use zip::ZipArchive;

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![90u8; (width * height * 3) as usize];
        let mut out = Vec::new();
        JpegEncoder::new(&mut out)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[test]
    fn photos_are_embedded_as_media() {
        let _ = env_logger::builder().is_test(true).try_init();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut visit = Visit::new("Acme", "Plant 1", "P-100", date, "J. Doe");
        visit.photos = vec![
            Photo::new("ok").with_description("North wall").with_notes("Hairline crack\nMonitor"),
            Photo::new("broken"),
        ];
        let repo = InMemoryPhotoRepository::new()
            .with_photo("ok", jpeg(40, 30))
            .with_photo("broken", b"\xff\xd8garbage".to_vec());
        let config = ReportConfig::default();
        let model = ReportModel::build(&visit, &config, Density::Six);

        let mut renderer = DocxReportRenderer::new();
        assert_eq!(renderer.format(), ExportFormat::Docx);
        let bytes = renderer.render(&model, &repo).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert!(archive.by_name("word/media/image1.jpeg").is_ok());
        assert!(archive.by_name("word/media/image2.jpeg").is_err());

        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains("r:embed=\"rId4\""));
        assert!(document.contains("Photo 1: North wall"));
        assert!(document.contains("Hairline crack Monitor"));
        assert!(document.contains("[Photo 2 failed to load]"));
        assert_eq!(document.matches("<w:br w:type=\"page\"/>").count(), 1);
    }

    #[test]
    fn control_characters_are_scrubbed_from_every_part() {
        let _ = env_logger::builder().is_test(true).try_init();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut visit = Visit::new("Acme\u{0001}", "Plant 1", "P-100", date, "J. Doe");
        visit.observations = "Crack\u{000B}in wall\nLeak\u{0001}".into();
        visit.photos = vec![Photo::new("ok").with_description("North\u{0007} wall")];
        let repo = InMemoryPhotoRepository::new().with_photo("ok", jpeg(20, 20));
        let config = ReportConfig::default();
        let model = ReportModel::build(&visit, &config, Density::Six);

        let bytes = DocxReportRenderer::new().render(&model, &repo).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = archive
            .file_names()
            .filter(|name| name.ends_with(".xml") || name.ends_with(".rels"))
            .map(str::to_string)
            .collect();
        for name in names {
            let mut part = Vec::new();
            archive.by_name(&name).unwrap().read_to_end(&mut part).unwrap();
            let illegal: Vec<u8> = part
                .iter()
                .copied()
                .filter(|b| *b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
                .collect();
            assert!(illegal.is_empty(), "control bytes {illegal:?} in {name}");
        }

        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains(">Crack in wall<"));
        assert!(document.contains(">Leak<"));
        assert!(document.contains("descr=\"North wall\""));
    }
}
