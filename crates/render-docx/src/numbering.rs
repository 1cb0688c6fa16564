//! `word/numbering.xml`: list definitions and per-paragraph instances.
//!
//! Each list style gets one abstract definition. Every counted paragraph
//! gets its own `w:num` restarting at its resolved ordinal, so the label
//! the host draws never depends on its own counting. Bullets share one
//! instance.

use crate::tree::ListMarker;
use crate::units::twips;
use crate::xml::XmlWriter;
use visit_report_layout::ListStyle;
use visit_report_layout::outline::BULLET_GLYPH;
use visit_report_render_core::RenderError;

const BULLET_ABSTRACT_ID: u32 = 0;
pub(crate) const BULLET_NUM_ID: u32 = 1;

const STYLES: [ListStyle; 5] = [
    ListStyle::Decimal,
    ListStyle::LowerAlpha,
    ListStyle::UpperAlpha,
    ListStyle::LowerRoman,
    ListStyle::UpperRoman,
];

/// Left edge of numbered text and of bullet text, in points.
const ORDINAL_TEXT_INDENT: f32 = 28.0;
const BULLET_TEXT_INDENT: f32 = 48.0;
const HANGING: f32 = 18.0;

fn abstract_id(style: ListStyle) -> u32 {
    STYLES.iter().position(|s| *s == style).unwrap_or(0) as u32 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumInstance {
    num_id: u32,
    abstract_id: u32,
    start: u32,
}

#[derive(Debug, Default)]
pub(crate) struct NumberingRegistry {
    instances: Vec<NumInstance>,
}

impl NumberingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `w:numId` for a paragraph carrying `marker`.
    pub fn num_id(&mut self, marker: &ListMarker) -> u32 {
        match marker {
            ListMarker::Bullet => BULLET_NUM_ID,
            ListMarker::Ordinal { style, ordinal } => {
                let num_id = BULLET_NUM_ID + 1 + self.instances.len() as u32;
                self.instances.push(NumInstance {
                    num_id,
                    abstract_id: abstract_id(*style),
                    start: *ordinal,
                });
                num_id
            }
        }
    }

    pub fn write(&self) -> Result<Vec<u8>, RenderError> {
        let mut xml = XmlWriter::new()?;
        xml.start(
            "w:numbering",
            &[("xmlns:w", "http://schemas.openxmlformats.org/wordprocessingml/2006/main")],
        )?;

        write_abstract(&mut xml, BULLET_ABSTRACT_ID, "bullet", BULLET_GLYPH, BULLET_TEXT_INDENT)?;
        for style in STYLES {
            write_abstract(&mut xml, abstract_id(style), style.word_num_fmt(), "%1.", ORDINAL_TEXT_INDENT)?;
        }

        write_num(&mut xml, BULLET_NUM_ID, BULLET_ABSTRACT_ID, None)?;
        for instance in &self.instances {
            write_num(&mut xml, instance.num_id, instance.abstract_id, Some(instance.start))?;
        }

        xml.end("w:numbering")?;
        Ok(xml.into_bytes())
    }
}

fn write_abstract(xml: &mut XmlWriter, id: u32, num_fmt: &str, text: &str, indent: f32) -> Result<(), RenderError> {
    let id = id.to_string();
    let left = twips(indent).to_string();
    let hanging = twips(HANGING).to_string();

    xml.start("w:abstractNum", &[("w:abstractNumId", &id)])?;
    xml.empty("w:multiLevelType", &[("w:val", "singleLevel")])?;
    xml.start("w:lvl", &[("w:ilvl", "0")])?;
    xml.empty("w:start", &[("w:val", "1")])?;
    xml.empty("w:numFmt", &[("w:val", num_fmt)])?;
    xml.empty("w:lvlText", &[("w:val", text)])?;
    xml.empty("w:lvlJc", &[("w:val", "left")])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:ind", &[("w:left", &left), ("w:hanging", &hanging)])?;
    xml.end("w:pPr")?;
    xml.end("w:lvl")?;
    xml.end("w:abstractNum")
}

fn write_num(xml: &mut XmlWriter, num_id: u32, abstract_id: u32, start: Option<u32>) -> Result<(), RenderError> {
    let num_id = num_id.to_string();
    let abstract_id = abstract_id.to_string();
    xml.start("w:num", &[("w:numId", &num_id)])?;
    xml.empty("w:abstractNumId", &[("w:val", &abstract_id)])?;
    if let Some(start) = start {
        let start = start.to_string();
        xml.start("w:lvlOverride", &[("w:ilvl", "0")])?;
        xml.empty("w:startOverride", &[("w:val", &start)])?;
        xml.end("w:lvlOverride")?;
    }
    xml.end("w:num")
}
