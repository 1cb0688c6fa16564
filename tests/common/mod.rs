pub mod assertions;
pub mod fixtures;

use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use std::io::{Cursor, Read};
use visit_report::{
    Density, ExportError, ExportFormat, InMemoryPhotoRepository, ReportConfig, ReportExporter,
    Visit,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every `Tj` string shown on one page (1-based), decoded from WinAnsi.
    pub fn page_strings(&self, page_number: u32) -> Vec<String> {
        let pages = self.doc.get_pages();
        let Some(page_id) = pages.get(&page_number) else {
            return Vec::new();
        };
        let Ok(raw) = self.doc.get_page_content(*page_id) else {
            return Vec::new();
        };
        let Ok(content) = Content::decode(&raw) else {
            return Vec::new();
        };
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|operand| operand.as_str().ok())
            .map(decode_win_ansi)
            .collect()
    }

    /// Strings of all pages, in page order.
    pub fn all_strings(&self) -> Vec<String> {
        (1..=self.page_count() as u32)
            .flat_map(|page| self.page_strings(page))
            .collect()
    }

    /// Count of image XObjects drawn on one page.
    pub fn image_draws(&self, page_number: u32) -> usize {
        let pages = self.doc.get_pages();
        let Some(page_id) = pages.get(&page_number) else {
            return 0;
        };
        self.doc
            .get_page_content(*page_id)
            .ok()
            .and_then(|raw| Content::decode(&raw).ok())
            .map(|content| {
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Do")
                    .count()
            })
            .unwrap_or(0)
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x95 => '\u{2022}',
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            0x85 => '\u{2026}',
            other => other as char,
        })
        .collect()
}

/// Wrapper around a generated DOCX package.
pub struct GeneratedDocx {
    pub bytes: Vec<u8>,
}

impl GeneratedDocx {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        // Fail early on anything that is not a readable zip.
        zip::ZipArchive::new(Cursor::new(bytes.as_slice()))?;
        Ok(Self { bytes })
    }

    pub fn part(&self, name: &str) -> Result<String, Box<dyn std::error::Error>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(self.bytes.as_slice()))?;
        let mut file = archive.by_name(name)?;
        let mut out = String::new();
        file.read_to_string(&mut out)?;
        Ok(out)
    }

    pub fn part_names(&self) -> Vec<String> {
        zip::ZipArchive::new(Cursor::new(self.bytes.as_slice()))
            .map(|archive| archive.file_names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn document_xml(&self) -> String {
        self.part("word/document.xml").unwrap_or_default()
    }

    /// Text of every `<w:t>` run in the body, unescaped.
    pub fn texts(&self) -> Vec<String> {
        let xml = self.document_xml();
        let mut out = Vec::new();
        let mut rest = xml.as_str();
        while let Some(start) = rest.find("<w:t") {
            rest = &rest[start + 4..];
            // Skip <w:tbl>, <w:tc> and friends.
            if !(rest.starts_with('>') || rest.starts_with(' ')) {
                continue;
            }
            let Some(open_end) = rest.find('>') else { break };
            if rest[..open_end].ends_with('/') {
                rest = &rest[open_end + 1..];
                continue;
            }
            rest = &rest[open_end + 1..];
            let Some(close) = rest.find("</w:t>") else { break };
            out.push(unescape(&rest[..close]));
            rest = &rest[close..];
        }
        out
    }

    pub fn page_breaks(&self) -> usize {
        self.document_xml().matches(r#"<w:br w:type="page"/>"#).count()
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn exporter(repository: InMemoryPhotoRepository) -> ReportExporter {
    exporter_with_config(ReportConfig::default(), repository)
}

pub fn exporter_with_config(
    config: ReportConfig,
    repository: InMemoryPhotoRepository,
) -> ReportExporter {
    ReportExporter::builder()
        .with_config(config)
        .with_repository(repository)
        .build()
        .expect("default geometry is valid")
}

pub fn export_pdf(
    exporter: &ReportExporter,
    visit: &Visit,
    density: Density,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let document = exporter.export_document(visit, ExportFormat::Pdf, density)?;
    GeneratedPdf::from_bytes(document.bytes)
}

pub fn export_docx(
    exporter: &ReportExporter,
    visit: &Visit,
    density: Density,
) -> Result<GeneratedDocx, Box<dyn std::error::Error>> {
    let document = exporter.export_document(visit, ExportFormat::Docx, density)?;
    GeneratedDocx::from_bytes(document.bytes)
}

#[allow(dead_code)]
pub fn export_err(
    exporter: &ReportExporter,
    visit: &Visit,
    format: ExportFormat,
) -> ExportError {
    match exporter.export_document(visit, format, Density::Six) {
        Ok(document) => panic!("expected an error, got {}", document.filename),
        Err(err) => err,
    }
}
