//! Thin event writer over quick-xml for the package parts.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::borrow::Cow;
use std::fmt::Display;
use visit_report_render_core::RenderError;

pub(crate) fn packaging(err: impl Display) -> RenderError {
    RenderError::Packaging(err.to_string())
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Text restricted to the XML 1.0 character range. Vertical tab and form
/// feed become spaces; other control characters are dropped.
pub(crate) fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .filter_map(|c| match c {
                '\u{000B}' | '\u{000C}' => Some(' '),
                c if is_xml_char(c) => Some(c),
                _ => None,
            })
            .collect(),
    )
}

fn element_start<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        start.push_attribute((*key, xml_safe(value).as_ref()));
    }
    start
}

pub(crate) struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// A new part, starting with a standalone XML declaration.
    pub fn new() -> Result<Self, RenderError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(packaging)?;
        Ok(Self { writer })
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        self.writer.write_event(event).map_err(packaging)
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        self.write(Event::Start(element_start(name, attrs)))
    }

    pub fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        self.write(Event::Empty(element_start(name, attrs)))
    }

    pub fn text(&mut self, text: &str) -> Result<(), RenderError> {
        self.write(Event::Text(BytesText::new(&xml_safe(text))))
    }

    /// `<name attrs>text</name>`
    pub fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), RenderError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        let mut xml = XmlWriter::new().unwrap();
        xml.element("w:t", &[("xml:space", "preserve")], "Acme & Co. <East>").unwrap();
        let out = String::from_utf8(xml.into_bytes()).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(out.ends_with("<w:t xml:space=\"preserve\">Acme &amp; Co. &lt;East&gt;</w:t>"));
    }

    #[test]
    fn control_characters_never_reach_the_part() {
        assert_eq!(xml_safe("Crack\u{000B}in wall"), "Crack in wall");
        assert_eq!(xml_safe("Leak\u{0001}"), "Leak");
        assert!(matches!(xml_safe("tab\tand\nnewline"), Cow::Borrowed(_)));

        let mut xml = XmlWriter::new().unwrap();
        xml.empty("wp:docPr", &[("descr", "north\u{0007} wall")]).unwrap();
        xml.element("w:t", &[], "bell\u{0007}").unwrap();
        let out = String::from_utf8(xml.into_bytes()).unwrap();
        assert!(out.contains("descr=\"north wall\""));
        assert!(out.contains("<w:t>bell</w:t>"));
    }
}
