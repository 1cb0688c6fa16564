mod common;

use common::fixtures::*;
use common::{GeneratedPdf, TestResult, init_logger};
use std::fs;
use visit_report::{Density, ExportFormat, ExporterBuilder, FilesystemPhotoRepository, Visit};

#[test]
fn test_exports_photos_from_a_directory() -> TestResult {
    init_logger();

    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("p1.jpg"), jpeg(32, 24))?;
    fs::write(dir.path().join("p2.png"), png(24, 32))?;

    let visit = visit_with_photos(3);
    let exporter = ExporterBuilder::new()
        .with_repository(FilesystemPhotoRepository::new(dir.path()))
        .build()?;
    let document = exporter.export_document(&visit, ExportFormat::Pdf, Density::Six)?;

    let pdf = GeneratedPdf::from_bytes(document.bytes.clone())?;
    assert_eq!(pdf.image_draws(2), 2);
    assert_pdf_shows!(pdf, "[Photo 3 failed to load]");

    let path = document.write_to_dir(dir.path())?;
    assert!(path.ends_with("Site_Visit_Report_Acme_Plant1_20240115.pdf"));
    assert!(fs::metadata(path)?.len() > 0);
    Ok(())
}

#[test]
fn test_visit_and_config_load_from_json_files() -> TestResult {
    init_logger();

    let dir = tempfile::tempdir()?;
    let visit_json = r#"{
        "clientName": "Acme",
        "siteName": "Plant 1",
        "projectNo": "P-100",
        "visitDate": "2024-01-15",
        "preparedBy": "J. Doe",
        "observations": "Crack in wall\n\tminor\nLeak detected"
    }"#;
    let config_json = r#"{ "filenamePrefix": "Inspection", "title": "Inspection Report" }"#;
    fs::write(dir.path().join("visit.json"), visit_json)?;
    fs::write(dir.path().join("config.json"), config_json)?;

    let visit: Visit = serde_json::from_str(&fs::read_to_string(dir.path().join("visit.json"))?)?;
    let exporter = ExporterBuilder::new()
        .with_config_file(dir.path().join("config.json"))?
        .with_repository(FilesystemPhotoRepository::new(dir.path()))
        .build()?;
    let document = exporter.export_document(&visit, ExportFormat::Docx, Density::Two)?;

    assert_eq!(document.filename, "Inspection_Acme_Plant1_20240115.docx");
    assert_eq!(
        document.content_type(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    Ok(())
}
