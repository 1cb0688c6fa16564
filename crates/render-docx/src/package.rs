//! Serializes a `DocTree` into the parts of a `.docx` package and zips them.

use crate::numbering::NumberingRegistry;
use crate::tree::{Align, Block, DocTree, FieldKind, ImageRef, Inline, Paragraph, RunStyle, Table, HEADING_SIZE};
use crate::units::{emu, half_points, twips};
use crate::xml::{XmlWriter, packaging};
use std::io::{Cursor, Write};
use visit_report_render_core::{PageGeometry, PhotoFormat, RenderError};
use visit_report_types::Color;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const STYLES_REL: &str = "rId1";
const NUMBERING_REL: &str = "rId2";
const FOOTER_REL: &str = "rId3";
const FIRST_MEDIA_REL: usize = 4;

/// Space below a section heading and its rule.
const HEADING_SPACE_AFTER: f32 = 12.0;
const HEADER_FOOTER_DISTANCE: f32 = 18.0;

fn media_rel_id(index: usize) -> String {
    format!("rId{}", FIRST_MEDIA_REL + index)
}

fn media_file_name(index: usize, format: PhotoFormat) -> String {
    format!("image{}.{}", index + 1, format.extension())
}

/// Build the complete package for `tree` on pages of `geometry`.
pub(crate) fn write_package(tree: &DocTree, geometry: &PageGeometry) -> Result<Vec<u8>, RenderError> {
    let mut numbering = NumberingRegistry::new();
    let document = DocumentWriter::new(geometry, &mut numbering).write(tree)?;

    let mut parts: Vec<(String, Vec<u8>)> = vec![
        ("[Content_Types].xml".to_string(), content_types()?),
        ("_rels/.rels".to_string(), package_rels()?),
        ("word/document.xml".to_string(), document),
        ("word/_rels/document.xml.rels".to_string(), document_rels(tree)?),
        ("word/styles.xml".to_string(), styles()?),
        ("word/numbering.xml".to_string(), numbering.write()?),
        ("word/footer1.xml".to_string(), footer(tree, geometry)?),
        ("docProps/core.xml".to_string(), core_properties(tree)?),
    ];
    for (index, media) in tree.media.iter().enumerate() {
        parts.push((
            format!("word/media/{}", media_file_name(index, media.format)),
            media.data.as_ref().clone(),
        ));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (path, bytes) in &parts {
        zip.start_file(path.as_str(), options).map_err(packaging)?;
        zip.write_all(bytes).map_err(packaging)?;
    }
    let cursor = zip.finish().map_err(packaging)?;
    Ok(cursor.into_inner())
}

fn content_types() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for format in [PhotoFormat::Jpeg, PhotoFormat::Png, PhotoFormat::Gif] {
        xml.empty(
            "Default",
            &[("Extension", format.extension()), ("ContentType", format.content_type())],
        )?;
    }
    let wordml = "application/vnd.openxmlformats-officedocument.wordprocessingml";
    for (part, kind) in [
        ("/word/document.xml", format!("{wordml}.document.main+xml")),
        ("/word/styles.xml", format!("{wordml}.styles+xml")),
        ("/word/numbering.xml", format!("{wordml}.numbering+xml")),
        ("/word/footer1.xml", format!("{wordml}.footer+xml")),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml".to_string(),
        ),
    ] {
        xml.empty("Override", &[("PartName", part), ("ContentType", &kind)])?;
    }
    xml.end("Types")?;
    Ok(xml.into_bytes())
}

fn package_rels() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    let office_document = format!("{REL_BASE}/officeDocument");
    xml.empty(
        "Relationship",
        &[("Id", "rId1"), ("Type", &office_document), ("Target", "word/document.xml")],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            (
                "Type",
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            ),
            ("Target", "docProps/core.xml"),
        ],
    )?;
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn document_rels(tree: &DocTree) -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    for (id, kind, target) in [
        (STYLES_REL, "styles", "styles.xml"),
        (NUMBERING_REL, "numbering", "numbering.xml"),
        (FOOTER_REL, "footer", "footer1.xml"),
    ] {
        let kind = format!("{REL_BASE}/{kind}");
        xml.empty("Relationship", &[("Id", id), ("Type", &kind), ("Target", target)])?;
    }
    let image_kind = format!("{REL_BASE}/image");
    for (index, media) in tree.media.iter().enumerate() {
        let id = media_rel_id(index);
        let target = format!("media/{}", media_file_name(index, media.format));
        xml.empty("Relationship", &[("Id", &id), ("Type", &image_kind), ("Target", &target)])?;
    }
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn styles() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_W)])?;
    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[("w:ascii", "Helvetica"), ("w:hAnsi", "Helvetica"), ("w:cs", "Helvetica")],
    )?;
    xml.empty("w:sz", &[("w:val", "22")])?;
    xml.empty("w:szCs", &[("w:val", "22")])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:after", "0"), ("w:line", "240"), ("w:lineRule", "auto")])?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.end("w:style")?;

    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", "Heading1")])?;
    xml.empty("w:name", &[("w:val", "heading 1")])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.empty("w:next", &[("w:val", "Normal")])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:keepNext", &[])?;
    xml.empty("w:outlineLvl", &[("w:val", "0")])?;
    xml.end("w:pPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.into_bytes())
}

fn footer(tree: &DocTree, geometry: &PageGeometry) -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:ftr", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    // The footer never carries list markers or pictures.
    let mut numbering = NumberingRegistry::new();
    let mut writer = DocumentWriter::new(geometry, &mut numbering);
    writer.paragraph(&mut xml, &tree.footer)?;
    xml.end("w:ftr")?;
    Ok(xml.into_bytes())
}

fn core_properties(tree: &DocTree) -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.element("dc:title", &[], &tree.title)?;
    xml.element("dc:subject", &[], &tree.subject)?;
    xml.element("dc:creator", &[], &tree.author)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

/// Writes `word/document.xml`, assigning list instances as it goes.
struct DocumentWriter<'n> {
    geometry: PageGeometry,
    numbering: &'n mut NumberingRegistry,
    drawing_id: u32,
    heading_color: Color,
}

impl<'n> DocumentWriter<'n> {
    fn new(geometry: &PageGeometry, numbering: &'n mut NumberingRegistry) -> Self {
        Self {
            geometry: *geometry,
            numbering,
            drawing_id: 0,
            heading_color: Color::BLACK,
        }
    }

    fn write(mut self, tree: &DocTree) -> Result<Vec<u8>, RenderError> {
        self.heading_color = tree.heading_color;
        let mut xml = XmlWriter::new()?;
        xml.start(
            "w:document",
            &[
                ("xmlns:w", NS_W),
                ("xmlns:r", NS_R),
                ("xmlns:wp", NS_WP),
                ("xmlns:a", NS_A),
                ("xmlns:pic", NS_PIC),
            ],
        )?;
        xml.start("w:body", &[])?;

        for block in &tree.blocks {
            match block {
                Block::Heading(text) => self.heading(&mut xml, text)?,
                Block::Paragraph(paragraph) => self.paragraph(&mut xml, paragraph)?,
                Block::Table(table) => self.table(&mut xml, table)?,
                Block::PageBreak => {
                    xml.start("w:p", &[])?;
                    xml.start("w:r", &[])?;
                    xml.empty("w:br", &[("w:type", "page")])?;
                    xml.end("w:r")?;
                    xml.end("w:p")?;
                }
            }
        }
        if matches!(tree.blocks.last(), Some(Block::Table(_))) {
            xml.empty("w:p", &[])?;
        }

        self.section_properties(&mut xml)?;
        xml.end("w:body")?;
        xml.end("w:document")?;
        Ok(xml.into_bytes())
    }

    fn section_properties(&self, xml: &mut XmlWriter) -> Result<(), RenderError> {
        let width = twips(self.geometry.width).to_string();
        let height = twips(self.geometry.height).to_string();
        let margin = twips(self.geometry.margin).to_string();
        let distance = twips(HEADER_FOOTER_DISTANCE).to_string();

        xml.start("w:sectPr", &[])?;
        xml.empty("w:footerReference", &[("w:type", "default"), ("r:id", FOOTER_REL)])?;
        xml.empty("w:pgSz", &[("w:w", &width), ("w:h", &height)])?;
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", &margin),
                ("w:right", &margin),
                ("w:bottom", &margin),
                ("w:left", &margin),
                ("w:header", &distance),
                ("w:footer", &distance),
                ("w:gutter", "0"),
            ],
        )?;
        xml.end("w:sectPr")
    }

    fn heading(&mut self, xml: &mut XmlWriter, text: &str) -> Result<(), RenderError> {
        let color = self.heading_color.to_hex();
        let after = twips(HEADING_SPACE_AFTER).to_string();
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:pStyle", &[("w:val", "Heading1")])?;
        xml.start("w:pBdr", &[])?;
        xml.empty(
            "w:bottom",
            &[("w:val", "single"), ("w:sz", "6"), ("w:space", "1"), ("w:color", &color)],
        )?;
        xml.end("w:pBdr")?;
        xml.empty("w:spacing", &[("w:before", "120"), ("w:after", &after)])?;
        xml.end("w:pPr")?;
        let style = RunStyle {
            bold: true,
            size: Some(HEADING_SIZE),
            color: Some(self.heading_color),
        };
        self.text_run(xml, text, &style)?;
        xml.end("w:p")
    }

    fn paragraph(&mut self, xml: &mut XmlWriter, paragraph: &Paragraph) -> Result<(), RenderError> {
        let props = &paragraph.props;
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        if let Some(marker) = &paragraph.list {
            let num_id = self.numbering.num_id(marker).to_string();
            xml.start("w:numPr", &[])?;
            xml.empty("w:ilvl", &[("w:val", "0")])?;
            xml.empty("w:numId", &[("w:val", &num_id)])?;
            xml.end("w:numPr")?;
        }
        if let Some(fill) = props.shading {
            shading(xml, fill)?;
        }
        if let Some(position) = props.right_tab {
            let position = twips(position).to_string();
            xml.start("w:tabs", &[])?;
            xml.empty("w:tab", &[("w:val", "right"), ("w:pos", &position)])?;
            xml.end("w:tabs")?;
        }
        let after = twips(props.space_after).to_string();
        xml.empty("w:spacing", &[("w:after", &after)])?;
        if paragraph.list.is_none() && props.indent_left > 0.0 {
            let left = twips(props.indent_left).to_string();
            xml.empty("w:ind", &[("w:left", &left)])?;
        }
        if props.align == Align::Center {
            xml.empty("w:jc", &[("w:val", "center")])?;
        }
        xml.end("w:pPr")?;

        for inline in &paragraph.inlines {
            match inline {
                Inline::Text { text, style } => self.text_run(xml, text, style)?,
                Inline::Tab => simple_run(xml, "w:tab")?,
                Inline::LineBreak => simple_run(xml, "w:br")?,
                Inline::Image(image) => self.drawing(xml, image)?,
                Inline::Field { kind, style } => self.field(xml, *kind, style)?,
            }
        }
        xml.end("w:p")
    }

    fn text_run(&mut self, xml: &mut XmlWriter, text: &str, style: &RunStyle) -> Result<(), RenderError> {
        xml.start("w:r", &[])?;
        run_properties(xml, style)?;
        xml.element("w:t", &[("xml:space", "preserve")], text)?;
        xml.end("w:r")
    }

    fn field(&mut self, xml: &mut XmlWriter, kind: FieldKind, style: &RunStyle) -> Result<(), RenderError> {
        let instruction = format!(" {} ", kind.instruction());
        for (tag, attrs, text) in [
            ("w:fldChar", vec![("w:fldCharType", "begin")], None),
            ("w:instrText", vec![("xml:space", "preserve")], Some(instruction.as_str())),
            ("w:fldChar", vec![("w:fldCharType", "separate")], None),
            ("w:t", vec![], Some("1")),
            ("w:fldChar", vec![("w:fldCharType", "end")], None),
        ] {
            xml.start("w:r", &[])?;
            run_properties(xml, style)?;
            match text {
                Some(text) => xml.element(tag, &attrs, text)?,
                None => xml.empty(tag, &attrs)?,
            }
            xml.end("w:r")?;
        }
        Ok(())
    }

    fn drawing(&mut self, xml: &mut XmlWriter, image: &ImageRef) -> Result<(), RenderError> {
        self.drawing_id += 1;
        let id = self.drawing_id.to_string();
        let name = format!("Photo {}", self.drawing_id);
        let cx = emu(image.width).to_string();
        let cy = emu(image.height).to_string();
        let rel_id = media_rel_id(image.media);

        xml.start("w:r", &[])?;
        xml.start("w:drawing", &[])?;
        xml.start(
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        )?;
        xml.empty("wp:extent", &[("cx", &cx), ("cy", &cy)])?;
        xml.empty("wp:docPr", &[("id", &id), ("name", &name), ("descr", &image.description)])?;
        xml.start("a:graphic", &[])?;
        xml.start("a:graphicData", &[("uri", NS_PIC)])?;
        xml.start("pic:pic", &[])?;
        xml.start("pic:nvPicPr", &[])?;
        xml.empty("pic:cNvPr", &[("id", &id), ("name", &name)])?;
        xml.empty("pic:cNvPicPr", &[])?;
        xml.end("pic:nvPicPr")?;
        xml.start("pic:blipFill", &[])?;
        xml.empty("a:blip", &[("r:embed", &rel_id)])?;
        xml.start("a:stretch", &[])?;
        xml.empty("a:fillRect", &[])?;
        xml.end("a:stretch")?;
        xml.end("pic:blipFill")?;
        xml.start("pic:spPr", &[])?;
        xml.start("a:xfrm", &[])?;
        xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
        xml.empty("a:ext", &[("cx", &cx), ("cy", &cy)])?;
        xml.end("a:xfrm")?;
        xml.start("a:prstGeom", &[("prst", "rect")])?;
        xml.empty("a:avLst", &[])?;
        xml.end("a:prstGeom")?;
        xml.end("pic:spPr")?;
        xml.end("pic:pic")?;
        xml.end("a:graphicData")?;
        xml.end("a:graphic")?;
        xml.end("wp:inline")?;
        xml.end("w:drawing")?;
        xml.end("w:r")
    }

    fn table(&mut self, xml: &mut XmlWriter, table: &Table) -> Result<(), RenderError> {
        let total: f32 = table.columns.iter().sum();
        let total = twips(total).to_string();
        let cell_margin = twips(table.cell_margin).to_string();

        xml.start("w:tbl", &[])?;
        xml.start("w:tblPr", &[])?;
        xml.empty("w:tblW", &[("w:w", &total), ("w:type", "dxa")])?;
        if table.centered {
            xml.empty("w:jc", &[("w:val", "center")])?;
        }
        xml.start("w:tblBorders", &[])?;
        let border_color = table.borders.map(|c| c.to_hex());
        for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            match &border_color {
                Some(color) => xml.empty(
                    edge,
                    &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", color)],
                )?,
                None => xml.empty(edge, &[("w:val", "nil")])?,
            }
        }
        xml.end("w:tblBorders")?;
        xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
        xml.start("w:tblCellMar", &[])?;
        for edge in ["w:top", "w:left", "w:bottom", "w:right"] {
            xml.empty(edge, &[("w:w", &cell_margin), ("w:type", "dxa")])?;
        }
        xml.end("w:tblCellMar")?;
        xml.end("w:tblPr")?;

        xml.start("w:tblGrid", &[])?;
        let widths: Vec<String> = table.columns.iter().map(|w| twips(*w).to_string()).collect();
        for width in &widths {
            xml.empty("w:gridCol", &[("w:w", width)])?;
        }
        xml.end("w:tblGrid")?;

        for row in &table.rows {
            xml.start("w:tr", &[])?;
            if let Some(height) = row.height {
                let height = twips(height).to_string();
                xml.start("w:trPr", &[])?;
                xml.empty("w:trHeight", &[("w:val", &height), ("w:hRule", "atLeast")])?;
                xml.end("w:trPr")?;
            }
            for (index, cell) in row.cells.iter().enumerate() {
                let width = widths.get(index).map(String::as_str).unwrap_or("0");
                xml.start("w:tc", &[])?;
                xml.start("w:tcPr", &[])?;
                xml.empty("w:tcW", &[("w:w", width), ("w:type", "dxa")])?;
                if let Some(fill) = cell.shading {
                    shading(xml, fill)?;
                }
                xml.end("w:tcPr")?;
                if cell.paragraphs.is_empty() {
                    xml.empty("w:p", &[])?;
                }
                for paragraph in &cell.paragraphs {
                    self.paragraph(xml, paragraph)?;
                }
                xml.end("w:tc")?;
            }
            xml.end("w:tr")?;
        }
        xml.end("w:tbl")
    }
}

fn shading(xml: &mut XmlWriter, fill: Color) -> Result<(), RenderError> {
    let fill = fill.to_hex();
    xml.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", &fill)])
}

fn simple_run(xml: &mut XmlWriter, tag: &str) -> Result<(), RenderError> {
    xml.start("w:r", &[])?;
    xml.empty(tag, &[])?;
    xml.end("w:r")
}

fn run_properties(xml: &mut XmlWriter, style: &RunStyle) -> Result<(), RenderError> {
    if *style == RunStyle::default() {
        return Ok(());
    }
    xml.start("w:rPr", &[])?;
    if style.bold {
        xml.empty("w:b", &[])?;
    }
    if let Some(color) = style.color {
        let color = color.to_hex();
        xml.empty("w:color", &[("w:val", &color)])?;
    }
    if let Some(size) = style.size {
        let size = half_points(size).to_string();
        xml.empty("w:sz", &[("w:val", &size)])?;
        xml.empty("w:szCs", &[("w:val", &size)])?;
    }
    xml.end("w:rPr")
}
