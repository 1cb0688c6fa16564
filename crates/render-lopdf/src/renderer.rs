use crate::canvas::font_resource;
use crate::flow::Flow;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::Write;
use visit_report_layout::FontFace;
use visit_report_render_core::utils::to_win_ansi;
use visit_report_render_core::{DecodedPhoto, PhotoFormat, RenderError, ReportModel, ReportRenderer};
use visit_report_traits::PhotoRepository;
use visit_report_types::ExportFormat;

/// Renders a report model into a complete in-memory PDF document.
///
/// Fonts are the base-14 Helvetica faces, so the output embeds no font
/// programs. Page contents are Flate-compressed. JPEG photos keep their
/// stored bytes; other photos are embedded as Flate-compressed RGB.
#[derive(Debug, Clone)]
pub struct PdfReportRenderer {
    compression: Compression,
}

impl Default for PdfReportRenderer {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
        }
    }
}

impl PdfReportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zlib level 0-9 for content and image streams.
    pub fn with_compression(mut self, level: u32) -> Self {
        self.compression = Compression::new(level.min(9));
        self
    }
}

fn deflate(bytes: &[u8], level: Compression) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), level);
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Add a decoded photo as an image XObject.
///
/// Grayscale and colour JPEGs are copied through untouched under
/// `DCTDecode`. CMYK JPEGs and the other formats are re-encoded as RGB.
pub(crate) fn embed_photo(document: &mut Document, photo: &DecodedPhoto) -> Result<ObjectId, RenderError> {
    let color_space = match (photo.format, jpeg_components(&photo.original)) {
        (PhotoFormat::Jpeg, Some(1)) => "DeviceGray",
        (PhotoFormat::Jpeg, Some(3)) => "DeviceRGB",
        _ => return embed_rgb_image(document, &photo.to_rgb8()),
    };
    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(photo.width()),
            "Height" => i64::from(photo.height()),
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        photo.original.as_ref().clone(),
    );
    Ok(document.add_object(stream))
}

/// Component count from the first baseline, extended or progressive frame
/// header. `None` when the markers cannot be walked.
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        match marker {
            // fill byte
            0xFF => pos += 1,
            0x01 | 0xD0..=0xD8 => pos += 2,
            0xC0..=0xC2 => return data.get(pos + 9).copied(),
            0xDA | 0xD9 => return None,
            _ => {
                let length = usize::from(u16::from_be_bytes([data[pos + 2], data[pos + 3]]));
                if length < 2 {
                    return None;
                }
                pos += 2 + length;
            }
        }
    }
    None
}

/// Add `pixels` as a Flate-compressed RGB image XObject.
fn embed_rgb_image(document: &mut Document, pixels: &RgbImage) -> Result<ObjectId, RenderError> {
    let data = deflate(pixels.as_raw(), Compression::default())?;
    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(pixels.width()),
            "Height" => i64::from(pixels.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        data,
    );
    Ok(document.add_object(stream))
}

fn font_dictionary(document: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font_resource(face), font_id);
    }
    fonts
}

impl ReportRenderer for PdfReportRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&mut self, model: &ReportModel<'_>, photos: &dyn PhotoRepository) -> Result<Vec<u8>, RenderError> {
        let geometry = model.config.page;
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        let output = Flow::new(model, &mut document).run(photos)?;

        let mut page_ids = Vec::with_capacity(output.pages.len());
        for content in output.pages {
            let encoded = content
                .encode()
                .map_err(|e| RenderError::Serialize(e.to_string()))?;
            let stream = Stream::new(
                dictionary! {"Filter" => "FlateDecode"},
                deflate(&encoded, self.compression)?,
            );
            let content_id = document.add_object(stream);
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let mut xobjects = Dictionary::new();
        for (name, id) in &output.xobjects {
            xobjects.set(name.as_bytes(), *id);
        }
        let fonts = font_dictionary(&mut document);
        document.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! {
                "Font" => fonts,
                "XObject" => xobjects,
            }),
        );

        let page_count = page_ids.len();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
                "Count" => page_count as i64,
            }),
        );

        let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        document.trailer.set("Root", catalog_id);

        let subject = format!("{} - {}", model.visit.client_name, model.visit.site_name);
        let info_id = document.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(&model.config.title), StringFormat::Literal),
            "Subject" => Object::String(to_win_ansi(&subject), StringFormat::Literal),
            "Producer" => Object::string_literal("visit-report"),
        });
        document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| RenderError::Serialize(e.to_string()))?;

        log::info!(
            "Rendered PDF report: {} page(s), {} image(s), {} bytes",
            page_count,
            output.xobjects.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
