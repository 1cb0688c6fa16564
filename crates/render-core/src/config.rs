//! Report presentation settings, deserialized from a camelCase JSON file.

use serde::{Deserialize, Serialize};
use visit_report_layout::{GridArea, ListStyle};
use visit_report_types::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// Shown in the title bar.
    pub title: String,
    /// Shown right-aligned in the title bar and in every footer. Empty hides it.
    pub brand: String,
    /// First component of the output filename.
    pub filename_prefix: String,
    pub headings: HeadingConfig,
    pub observations_style: ListStyle,
    pub followups_style: ListStyle,
    pub theme: Theme,
    pub page: PageGeometry,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Site Visit Report".to_string(),
            brand: String::new(),
            filename_prefix: "Site_Visit_Report".to_string(),
            headings: HeadingConfig::default(),
            observations_style: ListStyle::Decimal,
            followups_style: ListStyle::LowerAlpha,
            theme: Theme::default(),
            page: PageGeometry::default(),
        }
    }
}

/// Section heading text and the label scheme for the section ordinals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingConfig {
    /// `null` turns section numbering off.
    pub numbering: Option<ListStyle>,
    pub background: String,
    pub observations: String,
    pub followups: String,
    pub photos: String,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            numbering: Some(ListStyle::Decimal),
            background: "Background & Purpose".to_string(),
            observations: "Site Observations".to_string(),
            followups: "Recommendations & Follow-up Actions".to_string(),
            photos: "Site Photos".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub navy: Color,
    pub light_gray: Color,
    pub border_gray: Color,
    pub text_gray: Color,
    pub footer_gray: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            navy: Color::rgb(23, 37, 84),
            light_gray: Color::gray(245),
            border_gray: Color::gray(200),
            text_gray: Color::gray(80),
            footer_gray: Color::gray(128),
        }
    }
}

/// Page size and vertical bands, in points. The defaults are US Letter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Band above the bottom margin kept free for the footer.
    pub footer_reserve: f32,
    /// Where the cursor restarts after a page break.
    pub continuation_top: f32,
    /// Top of the photo grid on every photo page, below its heading.
    pub photo_grid_top: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 36.0,
            footer_reserve: 28.0,
            continuation_top: 60.0,
            photo_grid_top: 90.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y any body block may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin - self.footer_reserve
    }

    pub fn photo_grid_area(&self) -> GridArea {
        GridArea::new(
            self.content_width(),
            (self.content_bottom() - self.photo_grid_top).max(0.0),
        )
    }
}
