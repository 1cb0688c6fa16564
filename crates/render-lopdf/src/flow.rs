//! Single-cursor layout of the report onto PDF pages.
//!
//! The flow moves through `HeaderBlock`, each outline section, each photo
//! page and finally the footer pass. Every block measures itself first and
//! breaks the page if it would cross into the footer band.

use crate::canvas::PageCanvas;
use crate::renderer::embed_photo;
use lopdf::content::Content;
use lopdf::{Document, ObjectId};
use visit_report_layout::photos::NOTES_MAX_LINES;
use visit_report_layout::{FontFace, PhotoPage, ResolvedLine, hanging_wrap, measure_text, photo_caption, photo_notes_excerpt, wrap_text};
use visit_report_render_core::{
    PageGeometry, RenderError, ReportModel, ResolvedSection, SectionBody, Theme, load_photo, photo_placeholder,
};
use visit_report_traits::PhotoRepository;
use visit_report_types::{Color, Rect};

const TITLE_BAR_HEIGHT: f32 = 90.0;
const TITLE_SIZE: f32 = 22.0;
const TITLE_BASELINE: f32 = 50.0;
const BRAND_SIZE: f32 = 10.0;

const INFO_BOX_TOP: f32 = 110.0;
const INFO_BOX_HEIGHT: f32 = 90.0;
const INFO_SIZE: f32 = 10.0;
const INFO_PADDING: f32 = 10.0;
const INFO_LABEL_WIDTH: f32 = 80.0;
const INFO_FIRST_BASELINE: f32 = 130.0;
const INFO_ROW_PITCH: f32 = 20.0;
const INFO_RIGHT_COLUMN: f32 = 300.0;

/// First body position under the info box.
const BODY_TOP: f32 = 232.0;

const HEADING_SIZE: f32 = 14.0;
const HEADING_ADVANCE: f32 = 25.0;
const RULE_OFFSET: f32 = 5.0;

const BODY_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 14.0;
const ITEM_GAP: f32 = 5.0;
const PARAGRAPH_GAP: f32 = 20.0;
const SECTION_GAP: f32 = 15.0;
const NUMBERED_INDENT: f32 = 10.0;
const BULLET_INDENT: f32 = 30.0;

const CAPTION_SIZE: f32 = 10.0;
const CAPTION_PADDING: f32 = 5.0;
const CAPTION_BASELINE: f32 = 14.0;
const NOTES_SIZE: f32 = 9.0;
const NOTES_LINE_HEIGHT: f32 = 10.0;

const FOOTER_SIZE: f32 = 8.0;
const FOOTER_OFFSET: f32 = 20.0;

fn baseline(top: f32, size: f32) -> f32 {
    top + size * 0.8
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlowState {
    HeaderBlock,
    OutlineSection(usize),
    PhotoSection(usize),
    Footers,
}

/// Position of the next block: page index and top y in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cursor {
    pub page: usize,
    pub y: f32,
}

pub(crate) struct FlowOutput {
    pub pages: Vec<Content>,
    /// Image XObjects referenced by name from the page contents.
    pub xobjects: Vec<(String, ObjectId)>,
}

pub(crate) struct Flow<'r> {
    model: &'r ReportModel<'r>,
    document: &'r mut Document,
    geometry: PageGeometry,
    theme: Theme,
    pages: Vec<PageCanvas>,
    cursor: Cursor,
    xobjects: Vec<(String, ObjectId)>,
}

impl<'r> Flow<'r> {
    pub fn new(model: &'r ReportModel<'r>, document: &'r mut Document) -> Self {
        Self {
            geometry: model.config.page,
            theme: model.config.theme,
            model,
            document,
            pages: Vec::new(),
            cursor: Cursor { page: 0, y: 0.0 },
            xobjects: Vec::new(),
        }
    }

    pub fn run(mut self, photos: &dyn PhotoRepository) -> Result<FlowOutput, RenderError> {
        let model = self.model;
        let mut state = FlowState::HeaderBlock;
        loop {
            state = match state {
                FlowState::HeaderBlock => {
                    self.header_block();
                    FlowState::OutlineSection(0)
                }
                FlowState::OutlineSection(index) => match model.sections.get(index) {
                    Some(section) => {
                        self.section(section);
                        FlowState::OutlineSection(index + 1)
                    }
                    None => FlowState::PhotoSection(0),
                },
                FlowState::PhotoSection(index) => match model.photo_pages.get(index) {
                    Some(page) => {
                        self.photo_page(page, photos)?;
                        FlowState::PhotoSection(index + 1)
                    }
                    None => FlowState::Footers,
                },
                FlowState::Footers => {
                    self.footers();
                    break;
                }
            };
        }

        Ok(FlowOutput {
            pages: self.pages.into_iter().map(PageCanvas::into_content).collect(),
            xobjects: self.xobjects,
        })
    }

    fn canvas(&mut self) -> &mut PageCanvas {
        &mut self.pages[self.cursor.page]
    }

    fn new_page(&mut self) {
        self.pages.push(PageCanvas::new(self.geometry.height));
        self.cursor = Cursor {
            page: self.pages.len() - 1,
            y: self.geometry.continuation_top,
        };
    }

    /// Break the page unless `height` more points fit above the footer band.
    /// `continued` re-emits that heading on the new page.
    fn ensure_room(&mut self, height: f32, continued: Option<&str>) {
        if self.cursor.y + height <= self.geometry.content_bottom() {
            return;
        }
        log::debug!("Page break before block of {:.1}pt on page {}", height, self.cursor.page + 1);
        self.new_page();
        if let Some(heading) = continued {
            self.heading(&format!("{heading} (continued)"));
        }
    }

    /// Vertical room for body content on a page that starts with a heading.
    fn page_capacity(&self) -> f32 {
        self.geometry.content_bottom() - self.geometry.continuation_top - HEADING_ADVANCE
    }

    fn header_block(&mut self) {
        self.new_page();
        let config = self.model.config;
        let (width, margin) = (self.geometry.width, self.geometry.margin);
        let theme = self.theme;
        let info_box = Rect::new(margin, INFO_BOX_TOP, self.geometry.content_width(), INFO_BOX_HEIGHT);
        let (left, right) = self.model.info_columns();

        let canvas = self.canvas();
        canvas.fill_rect(Rect::new(0.0, 0.0, width, TITLE_BAR_HEIGHT), theme.navy);
        canvas.text(margin, TITLE_BASELINE, FontFace::Bold, TITLE_SIZE, Color::WHITE, &config.title);
        if !config.brand.is_empty() {
            let x = width - margin - measure_text(&config.brand, FontFace::Regular, BRAND_SIZE);
            canvas.text(x, TITLE_BASELINE, FontFace::Regular, BRAND_SIZE, Color::WHITE, &config.brand);
        }

        canvas.fill_stroke_rect(info_box, theme.light_gray, theme.border_gray, 0.5);
        for (column_x, fields) in [(0.0, left), (INFO_RIGHT_COLUMN, right)] {
            let x = margin + INFO_PADDING + column_x;
            for (row, field) in fields.iter().enumerate() {
                let y = INFO_FIRST_BASELINE + row as f32 * INFO_ROW_PITCH;
                canvas.text(x, y, FontFace::Bold, INFO_SIZE, Color::BLACK, field.label);
                canvas.text(x + INFO_LABEL_WIDTH, y, FontFace::Regular, INFO_SIZE, Color::BLACK, &field.value);
            }
        }

        self.cursor.y = BODY_TOP;
    }

    fn heading(&mut self, text: &str) {
        let (margin, right) = (self.geometry.margin, self.geometry.width - self.geometry.margin);
        let navy = self.theme.navy;
        let y = self.cursor.y;
        let text_baseline = baseline(y, HEADING_SIZE);

        let canvas = self.canvas();
        canvas.text(margin, text_baseline, FontFace::Bold, HEADING_SIZE, navy, text);
        canvas.hline(margin, right, text_baseline + RULE_OFFSET, navy, 0.5);
        self.cursor.y += HEADING_ADVANCE;
    }

    fn section(&mut self, section: &ResolvedSection) {
        // Keep the heading together with its first line.
        self.ensure_room(HEADING_ADVANCE + LINE_HEIGHT, None);
        self.heading(&section.heading);

        match &section.body {
            SectionBody::Paragraph(text) => {
                let x = self.geometry.margin + NUMBERED_INDENT;
                let width = self.geometry.content_width() - 2.0 * NUMBERED_INDENT;
                for line in wrap_text(text, FontFace::Regular, BODY_SIZE, width) {
                    self.ensure_room(LINE_HEIGHT, Some(&section.heading));
                    self.body_line(x, &line);
                }
                self.cursor.y += PARAGRAPH_GAP;
            }
            SectionBody::Outline(lines) => {
                for line in lines {
                    self.outline_entry(line, &section.heading);
                }
                self.cursor.y += SECTION_GAP;
            }
        }
    }

    fn outline_entry(&mut self, line: &ResolvedLine, heading: &str) {
        let indent = if line.label.is_bullet() { BULLET_INDENT } else { NUMBERED_INDENT };
        let x = self.geometry.margin + indent;
        let width = self.geometry.content_width() - indent - NUMBERED_INDENT;
        let wrapped = hanging_wrap(line.label.display(), &line.text, FontFace::Regular, BODY_SIZE, width);

        let block = wrapped.lines.len() as f32 * LINE_HEIGHT;
        let keep_together = block <= self.page_capacity();
        if keep_together {
            self.ensure_room(block, Some(heading));
        }
        for (index, text) in wrapped.lines.iter().enumerate() {
            if !keep_together {
                self.ensure_room(LINE_HEIGHT, Some(heading));
            }
            let line_x = if index == 0 { x } else { x + wrapped.indent };
            self.body_line(line_x, text);
        }
        self.cursor.y += ITEM_GAP;
    }

    fn body_line(&mut self, x: f32, text: &str) {
        let y = baseline(self.cursor.y, BODY_SIZE);
        self.canvas().text(x, y, FontFace::Regular, BODY_SIZE, Color::BLACK, text);
        self.cursor.y += LINE_HEIGHT;
    }

    fn photo_page(&mut self, page: &PhotoPage, photos: &dyn PhotoRepository) -> Result<(), RenderError> {
        self.new_page();
        let heading = self.model.photo_heading(page);
        self.heading(&heading);

        let (dx, dy) = (self.geometry.margin, self.geometry.photo_grid_top);
        let theme = self.theme;

        for slot in &page.slots {
            let Some(photo) = self.model.photo(slot) else {
                continue;
            };
            let number = slot.number();
            let image_box = slot.image_box.translate(dx, dy);

            match load_photo(photos, photo, number) {
                Ok(decoded) => {
                    let name = format!("Im{}", self.xobjects.len() + 1);
                    let id = embed_photo(self.document, &decoded)?;
                    self.xobjects.push((name.clone(), id));
                    let rect = slot.fit(decoded.width(), decoded.height()).translate(dx, dy);
                    self.canvas().image(&name, rect);
                }
                Err(_) => {
                    let y = image_box.y + image_box.height / 2.0;
                    self.canvas().text(
                        image_box.x + CAPTION_PADDING,
                        y,
                        FontFace::Regular,
                        CAPTION_SIZE,
                        theme.text_gray,
                        &photo_placeholder(number),
                    );
                }
            }

            let caption = slot.caption.translate(dx, dy);
            let notes = slot.notes.translate(dx, dy);
            let caption_text = photo_caption(number, &photo.description);
            let notes_lines: Vec<String> = wrap_text(
                &photo_notes_excerpt(&photo.notes),
                FontFace::Regular,
                NOTES_SIZE,
                notes.width - 2.0 * CAPTION_PADDING,
            )
            .into_iter()
            .filter(|line| !line.is_empty())
            .take(NOTES_MAX_LINES)
            .collect();

            let canvas = self.canvas();
            canvas.fill_rect(caption, theme.navy);
            canvas.text(
                caption.x + CAPTION_PADDING,
                caption.y + CAPTION_BASELINE,
                FontFace::Bold,
                CAPTION_SIZE,
                Color::WHITE,
                &caption_text,
            );
            for (index, line) in notes_lines.iter().enumerate() {
                let y = notes.y + NOTES_LINE_HEIGHT * (index + 1) as f32;
                canvas.text(notes.x + CAPTION_PADDING, y, FontFace::Regular, NOTES_SIZE, theme.text_gray, line);
            }
        }
        Ok(())
    }

    /// Stamp every page once the total is known.
    fn footers(&mut self) {
        let total = self.pages.len();
        let brand = &self.model.config.brand;
        let y = self.geometry.height - FOOTER_OFFSET;
        let margin = self.geometry.margin;
        let brand_x = self.geometry.width - margin - measure_text(brand, FontFace::Regular, FOOTER_SIZE);
        let gray = self.theme.footer_gray;

        for (index, canvas) in self.pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", index + 1, total);
            canvas.text(margin, y, FontFace::Regular, FOOTER_SIZE, gray, &label);
            if !brand.is_empty() {
                canvas.text(brand_x, y, FontFace::Regular, FOOTER_SIZE, gray, brand);
            }
        }
    }
}
