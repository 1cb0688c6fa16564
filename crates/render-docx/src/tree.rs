//! Format-neutral word-processing tree built from a report model.

use visit_report_layout::photos::{COLUMN_GAP, ROW_GAP};
use visit_report_layout::{ListStyle, PhotoPage, PhotoSlot, photo_caption, photo_notes_excerpt};
use visit_report_render_core::{
    InfoField, PhotoFormat, ReportModel, ResolvedSection, SectionBody, SectionKind, Theme, load_photo,
    photo_placeholder,
};
use visit_report_traits::{PhotoRepository, SharedPhotoData};
use visit_report_types::Color;

const TITLE_SIZE: f32 = 22.0;
const BRAND_SIZE: f32 = 10.0;
const INFO_SIZE: f32 = 10.0;
pub(crate) const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const CAPTION_SIZE: f32 = 10.0;
const NOTES_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;

const BODY_INDENT: f32 = 10.0;
const CELL_MARGIN: f32 = 5.0;
/// Inset of caption and notes text inside their bars.
const CAPTION_PADDING: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunStyle {
    pub bold: bool,
    /// Points; `None` keeps the document default.
    pub size: Option<f32>,
    pub color: Option<Color>,
}

impl RunStyle {
    fn sized(size: f32) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Page,
    NumPages,
}

impl FieldKind {
    pub fn instruction(&self) -> &'static str {
        match self {
            FieldKind::Page => "PAGE",
            FieldKind::NumPages => "NUMPAGES",
        }
    }
}

/// Reference to an embedded picture, sized in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    /// Index into `DocTree::media`.
    pub media: usize,
    pub width: f32,
    pub height: f32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text { text: String, style: RunStyle },
    Tab,
    LineBreak,
    Image(ImageRef),
    Field { kind: FieldKind, style: RunStyle },
}

impl Inline {
    fn text(text: impl Into<String>, style: RunStyle) -> Self {
        Inline::Text {
            text: text.into(),
            style,
        }
    }
}

/// Native list marker of an outline paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Ordinal { style: ListStyle, ordinal: u32 },
    Bullet,
}

impl ListMarker {
    /// What the word processor shows for this marker.
    pub fn label(&self) -> String {
        match self {
            ListMarker::Ordinal { style, ordinal } => format!("{}.", style.format(*ordinal)),
            ListMarker::Bullet => visit_report_layout::outline::BULLET_GLYPH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphProps {
    pub align: Align,
    pub shading: Option<Color>,
    /// Points.
    pub indent_left: f32,
    pub space_after: f32,
    /// Position of a right-aligned tab stop, in points from the left margin.
    pub right_tab: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
    pub list: Option<ListMarker>,
    pub props: ParagraphProps,
}

impl Paragraph {
    fn empty() -> Self {
        Self::default()
    }

    fn spacer(space_after: f32) -> Self {
        Self {
            props: ParagraphProps {
                space_after,
                ..ParagraphProps::default()
            },
            ..Self::default()
        }
    }

    /// Concatenated run text, ignoring tabs, fields and pictures.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub shading: Option<Color>,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Minimum row height in points.
    pub height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Column widths in points.
    pub columns: Vec<f32>,
    pub rows: Vec<TableRow>,
    /// Single-line borders in this color; `None` is borderless.
    pub borders: Option<Color>,
    pub cell_margin: f32,
    /// Centre the table between the page margins.
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Section heading with a rule underneath.
    Heading(String),
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

/// A picture to store under `word/media`.
#[derive(Debug, Clone)]
pub struct Media {
    pub data: SharedPhotoData,
    pub format: PhotoFormat,
}

#[derive(Debug, Clone)]
pub struct DocTree {
    pub blocks: Vec<Block>,
    pub footer: Paragraph,
    pub media: Vec<Media>,
    pub title: String,
    pub subject: String,
    pub author: String,
    /// Color of section headings and their rules.
    pub heading_color: Color,
}

impl DocTree {
    pub fn page_breaks(&self) -> usize {
        self.blocks.iter().filter(|b| matches!(b, Block::PageBreak)).count()
    }

    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every paragraph in document order, including those inside tables.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => out.push(p),
                Block::Table(table) => {
                    for row in &table.rows {
                        for cell in &row.cells {
                            out.extend(cell.paragraphs.iter());
                        }
                    }
                }
                Block::Heading(_) | Block::PageBreak => {}
            }
        }
        out
    }
}

/// Lower `model` into a document tree, loading photos from `photos`.
///
/// A photo that cannot be loaded becomes its placeholder text; building the
/// tree itself never fails.
pub fn build(model: &ReportModel<'_>, photos: &dyn PhotoRepository) -> DocTree {
    let mut builder = TreeBuilder {
        model,
        theme: model.config.theme,
        content_width: model.config.page.content_width(),
        blocks: Vec::new(),
        media: Vec::new(),
    };

    builder.title_bar();
    builder.info_table();
    builder.push_paragraph(Paragraph::spacer(32.0));
    for section in &model.sections {
        builder.section(section);
    }
    for page in &model.photo_pages {
        builder.photo_page(page, photos);
    }

    let footer = builder.footer();
    let visit = model.visit;
    DocTree {
        blocks: builder.blocks,
        footer,
        media: builder.media,
        title: model.config.title.clone(),
        subject: format!("{} - {}", visit.client_name, visit.site_name),
        author: visit.prepared_by.clone(),
        heading_color: model.config.theme.navy,
    }
}

struct TreeBuilder<'m, 'a> {
    model: &'m ReportModel<'a>,
    theme: Theme,
    content_width: f32,
    blocks: Vec<Block>,
    media: Vec<Media>,
}

impl TreeBuilder<'_, '_> {
    fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    fn title_bar(&mut self) {
        let config = self.model.config;
        let mut inlines = vec![Inline::text(
            config.title.clone(),
            RunStyle::sized(TITLE_SIZE).bold().colored(Color::WHITE),
        )];
        if !config.brand.is_empty() {
            inlines.push(Inline::Tab);
            inlines.push(Inline::text(
                config.brand.clone(),
                RunStyle::sized(BRAND_SIZE).colored(Color::WHITE),
            ));
        }
        self.push_paragraph(Paragraph {
            inlines,
            list: None,
            props: ParagraphProps {
                shading: Some(self.theme.navy),
                space_after: 20.0,
                right_tab: Some(self.content_width),
                ..ParagraphProps::default()
            },
        });
    }

    fn info_table(&mut self) {
        let (left, right) = self.model.info_columns();
        let shading = Some(self.theme.light_gray);
        let cell = |field: Option<&InfoField>| TableCell {
            shading,
            paragraphs: vec![match field {
                Some(field) => Paragraph {
                    inlines: vec![
                        Inline::text(format!("{} ", field.label), RunStyle::sized(INFO_SIZE).bold()),
                        Inline::text(field.value.clone(), RunStyle::sized(INFO_SIZE)),
                    ],
                    ..Paragraph::default()
                },
                None => Paragraph::empty(),
            }],
        };

        let rows = (0..left.len().max(right.len()))
            .map(|i| TableRow {
                cells: vec![cell(left.get(i)), cell(right.get(i))],
                height: None,
            })
            .collect();

        let half = self.content_width / 2.0;
        self.blocks.push(Block::Table(Table {
            columns: vec![half, half],
            rows,
            borders: Some(self.theme.border_gray),
            cell_margin: CELL_MARGIN,
            centered: false,
        }));
    }

    fn section(&mut self, section: &ResolvedSection) {
        self.blocks.push(Block::Heading(section.heading.clone()));
        match &section.body {
            SectionBody::Paragraph(text) => {
                let mut inlines = Vec::new();
                for (index, line) in text.split('\n').enumerate() {
                    if index > 0 {
                        inlines.push(Inline::LineBreak);
                    }
                    inlines.push(Inline::text(line.trim_end_matches('\r'), RunStyle::sized(BODY_SIZE)));
                }
                self.push_paragraph(Paragraph {
                    inlines,
                    list: None,
                    props: ParagraphProps {
                        indent_left: BODY_INDENT,
                        space_after: 20.0,
                        ..ParagraphProps::default()
                    },
                });
            }
            SectionBody::Outline(lines) => {
                for line in lines {
                    let marker = match line.label.ordinal() {
                        Some(ordinal) => ListMarker::Ordinal {
                            style: self.section_style(section),
                            ordinal,
                        },
                        None => ListMarker::Bullet,
                    };
                    self.push_paragraph(Paragraph {
                        inlines: vec![Inline::text(line.text.clone(), RunStyle::sized(BODY_SIZE))],
                        list: Some(marker),
                        props: ParagraphProps {
                            space_after: 5.0,
                            ..ParagraphProps::default()
                        },
                    });
                }
                self.push_paragraph(Paragraph::spacer(15.0));
            }
        }
    }

    fn section_style(&self, section: &ResolvedSection) -> ListStyle {
        match section.kind {
            SectionKind::Followups => self.model.config.followups_style,
            _ => self.model.config.observations_style,
        }
    }

    fn photo_page(&mut self, page: &PhotoPage, photos: &dyn PhotoRepository) {
        self.blocks.push(Block::PageBreak);
        self.blocks.push(Block::Heading(self.model.photo_heading(page)));

        let columns = self.model.density.columns();
        // Photo columns are exactly the image box wide, separated by gap
        // columns, so caption bars match the slot geometry.
        let image_width = page
            .slots
            .first()
            .map(|slot| slot.image_box.width)
            .unwrap_or((self.content_width - COLUMN_GAP * (columns as f32 - 1.0)) / columns as f32);
        let mut widths = Vec::with_capacity(2 * columns);
        for column in 0..columns {
            if column > 0 {
                widths.push(COLUMN_GAP);
            }
            widths.push(image_width);
        }

        let grid_rows = page.slots.iter().map(|slot| slot.row + 1).max().unwrap_or(0);
        let mut rows = Vec::with_capacity(grid_rows * 4);
        for grid_row in 0..grid_rows {
            let in_row: Vec<Option<&PhotoSlot>> = (0..columns)
                .map(|column| {
                    page.slots
                        .iter()
                        .find(|slot| slot.row == grid_row && slot.column == column)
                })
                .collect();

            let image_height = in_row.iter().flatten().map(|slot| slot.image_box.height).fold(0.0, f32::max);
            let image_cells = in_row.iter().map(|slot| self.image_cell(*slot, photos)).collect();
            rows.push(TableRow {
                cells: with_gap_cells(image_cells),
                height: Some(image_height),
            });
            rows.push(TableRow {
                cells: with_gap_cells(in_row.iter().map(|slot| self.caption_cell(*slot)).collect()),
                height: None,
            });
            rows.push(TableRow {
                cells: with_gap_cells(in_row.iter().map(|slot| self.notes_cell(*slot)).collect()),
                height: None,
            });
            rows.push(TableRow {
                cells: vec![TableCell::default(); widths.len()],
                height: Some(ROW_GAP),
            });
        }

        self.blocks.push(Block::Table(Table {
            columns: widths,
            rows,
            borders: None,
            cell_margin: 0.0,
            centered: true,
        }));
    }

    fn centered(inlines: Vec<Inline>) -> Paragraph {
        Paragraph {
            inlines,
            list: None,
            props: ParagraphProps {
                align: Align::Center,
                ..ParagraphProps::default()
            },
        }
    }

    fn padded() -> ParagraphProps {
        ParagraphProps {
            indent_left: CAPTION_PADDING,
            ..ParagraphProps::default()
        }
    }

    fn image_cell(&mut self, slot: Option<&PhotoSlot>, photos: &dyn PhotoRepository) -> TableCell {
        let Some((slot, photo)) = slot.and_then(|s| self.model.photo(s).map(|p| (s, p))) else {
            return TableCell::default();
        };
        let number = slot.number();
        let inline = match load_photo(photos, photo, number) {
            Ok(decoded) => {
                let rect = slot.fit(decoded.width(), decoded.height());
                self.media.push(Media {
                    data: decoded.original.clone(),
                    format: decoded.format,
                });
                Inline::Image(ImageRef {
                    media: self.media.len() - 1,
                    width: rect.width,
                    height: rect.height,
                    description: photo.description.clone(),
                })
            }
            Err(_) => Inline::text(
                photo_placeholder(number),
                RunStyle::sized(CAPTION_SIZE).colored(self.theme.text_gray),
            ),
        };
        TableCell {
            shading: None,
            paragraphs: vec![Self::centered(vec![inline])],
        }
    }

    fn caption_cell(&self, slot: Option<&PhotoSlot>) -> TableCell {
        let Some((slot, photo)) = slot.and_then(|s| self.model.photo(s).map(|p| (s, p))) else {
            return TableCell::default();
        };
        TableCell {
            shading: Some(self.theme.navy),
            paragraphs: vec![Paragraph {
                inlines: vec![Inline::text(
                    photo_caption(slot.number(), &photo.description),
                    RunStyle::sized(CAPTION_SIZE).bold().colored(Color::WHITE),
                )],
                list: None,
                props: Self::padded(),
            }],
        }
    }

    fn notes_cell(&self, slot: Option<&PhotoSlot>) -> TableCell {
        let Some(photo) = slot.and_then(|s| self.model.photo(s)) else {
            return TableCell::default();
        };
        let excerpt = photo_notes_excerpt(&photo.notes);
        let inlines = if excerpt.is_empty() {
            Vec::new()
        } else {
            vec![Inline::text(excerpt, RunStyle::sized(NOTES_SIZE).colored(self.theme.text_gray))]
        };
        TableCell {
            shading: None,
            paragraphs: vec![Paragraph {
                inlines,
                list: None,
                props: Self::padded(),
            }],
        }
    }

    fn footer(&self) -> Paragraph {
        let style = RunStyle::sized(FOOTER_SIZE).colored(self.theme.footer_gray);
        let mut inlines = vec![
            Inline::text("Page ", style),
            Inline::Field {
                kind: FieldKind::Page,
                style,
            },
            Inline::text(" of ", style),
            Inline::Field {
                kind: FieldKind::NumPages,
                style,
            },
        ];
        let brand = &self.model.config.brand;
        if !brand.is_empty() {
            inlines.push(Inline::Tab);
            inlines.push(Inline::text(brand.clone(), style));
        }
        Paragraph {
            inlines,
            list: None,
            props: ParagraphProps {
                right_tab: Some(self.content_width),
                ..ParagraphProps::default()
            },
        }
    }
}

/// Interleave empty gap cells between the photo cells of one row.
fn with_gap_cells(cells: Vec<TableCell>) -> Vec<TableCell> {
    let mut out = Vec::with_capacity(cells.len() * 2);
    for (index, cell) in cells.into_iter().enumerate() {
        if index > 0 {
            out.push(TableCell::default());
        }
        out.push(cell);
    }
    out
}
