//! Photo Layout Planner.
//!
//! Partitions the photo list into pages of `density` photos and assigns each
//! one a grid slot. Slot rectangles are relative to the grid origin, so the
//! PDF backend offsets them by its cursor and the DOCX backend reads the
//! widths and heights for table cells and drawing extents.

use visit_report_types::geometry::{PixelSize, Rect, Size};
use visit_report_types::{Density, Photo};

/// Horizontal gap between grid columns.
pub const COLUMN_GAP: f32 = 20.0;
/// Height of the navy caption bar under each image.
pub const CAPTION_HEIGHT: f32 = 20.0;
/// Room for two 9pt lines of notes under the caption.
pub const NOTES_HEIGHT: f32 = 26.0;
pub const ROW_GAP: f32 = 10.0;
/// 6.5in x 3.5in, the largest image a two-per-page layout will draw.
pub const DENSITY_TWO_MAX_IMAGE: Size = Size {
    width: 468.0,
    height: 252.0,
};
/// Aspect used when a photo's pixel size is unknown.
pub const DEFAULT_ASPECT: f32 = 4.0 / 3.0;

pub const CAPTION_MAX_CHARS: usize = 35;
pub const NOTES_MAX_LINES: usize = 2;

/// The region available to one page of the photo grid, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridArea {
    pub width: f32,
    pub height: f32,
}

impl GridArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSlot {
    /// Index into `Visit::photos`.
    pub photo_index: usize,
    pub row: usize,
    pub column: usize,
    /// The whole grid cell.
    pub cell: Rect,
    /// Largest rectangle an image may occupy inside the cell.
    pub image_box: Rect,
    /// The planned image rectangle, using known dimensions or the default aspect.
    pub image: Rect,
    pub caption: Rect,
    pub notes: Rect,
}

impl PhotoSlot {
    /// 1-based photo number as shown in captions.
    pub fn number(&self) -> usize {
        self.photo_index + 1
    }

    /// Aspect-fit rectangle for an image of `width` x `height` pixels.
    ///
    /// The result sits on the bottom edge of `image_box` so it always touches
    /// the caption bar. A degenerate size falls back to the default aspect.
    pub fn fit(&self, width: u32, height: u32) -> Rect {
        let aspect = PixelSize::new(width, height)
            .aspect()
            .unwrap_or(DEFAULT_ASPECT);
        let size = self.image_box.size().fit_aspect(aspect);
        self.image_box.place_bottom_centered(size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoPage {
    /// 0-based index among photo pages.
    pub index: usize,
    /// True for every page after the first, which carries the "continued" heading.
    pub continued: bool,
    pub slots: Vec<PhotoSlot>,
}

/// Cell and image-box sizes for one density inside `area`.
fn slot_metrics(density: Density, area: GridArea) -> (Size, Size) {
    let columns = density.columns() as f32;
    let rows = density.rows() as f32;

    let cell_width = ((area.width - COLUMN_GAP * (columns - 1.0)) / columns).max(0.0);
    let row_pitch = (area.height / rows).max(0.0);
    let cell = Size::new(cell_width, row_pitch);

    let mut image = Size::new(
        cell_width,
        (row_pitch - CAPTION_HEIGHT - NOTES_HEIGHT - ROW_GAP).max(0.0),
    );
    if density == Density::Two {
        image.width = image.width.min(DENSITY_TWO_MAX_IMAGE.width);
        image.height = image.height.min(DENSITY_TWO_MAX_IMAGE.height);
    }
    (cell, image)
}

/// Plan every photo page for `photos`. No photos means no pages.
pub fn plan_photo_pages(photos: &[Photo], density: Density, area: GridArea) -> Vec<PhotoPage> {
    let per_page = density.photos_per_page();
    let columns = density.columns();
    let (cell_size, image_size) = slot_metrics(density, area);

    let pages: Vec<PhotoPage> = photos
        .chunks(per_page)
        .enumerate()
        .map(|(page_index, chunk)| {
            let slots = chunk
                .iter()
                .enumerate()
                .map(|(position, photo)| {
                    let row = position / columns;
                    let column = position % columns;
                    let cell = Rect::new(
                        column as f32 * (cell_size.width + COLUMN_GAP),
                        row as f32 * cell_size.height,
                        cell_size.width,
                        cell_size.height,
                    );
                    let image_box = Rect::new(
                        cell.x + (cell.width - image_size.width) / 2.0,
                        cell.y,
                        image_size.width,
                        image_size.height,
                    );
                    let caption = Rect::new(
                        image_box.x,
                        image_box.bottom(),
                        image_box.width,
                        CAPTION_HEIGHT,
                    );
                    let notes = Rect::new(image_box.x, caption.bottom(), image_box.width, NOTES_HEIGHT);

                    let mut slot = PhotoSlot {
                        photo_index: page_index * per_page + position,
                        row,
                        column,
                        cell,
                        image_box,
                        image: image_box,
                        caption,
                        notes,
                    };
                    slot.image = match photo.dimensions {
                        Some(px) => slot.fit(px.width, px.height),
                        None => slot.fit(0, 0),
                    };
                    slot
                })
                .collect();
            PhotoPage {
                index: page_index,
                continued: page_index > 0,
                slots,
            }
        })
        .collect();

    log::debug!(
        "Planned {} photo page(s) for {} photo(s) at density {}",
        pages.len(),
        photos.len(),
        per_page
    );
    pages
}

/// `Photo N: <description>` with the description cut at 35 characters, or
/// `Photo N` when there is no description.
pub fn photo_caption(number: usize, description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        return format!("Photo {number}");
    }
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(CAPTION_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("Photo {number}: {head}...")
    } else {
        format!("Photo {number}: {head}")
    }
}

/// The first two non-empty stored lines of `notes`, joined by a space.
pub fn photo_notes_excerpt(notes: &str) -> String {
    notes
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NOTES_MAX_LINES)
        .collect::<Vec<_>>()
        .join(" ")
}
