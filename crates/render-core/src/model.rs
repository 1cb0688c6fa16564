//! The resolved document handed to every backend.

use crate::config::ReportConfig;
use visit_report_layout::{ListStyle, PhotoPage, PhotoSlot, ResolvedLine, plan_photo_pages, resolve_outline};
use visit_report_types::{Density, Outline, Photo, Visit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Background,
    Observations,
    Followups,
}

impl SectionKind {
    /// Position among the report sections, used as the heading ordinal.
    /// Fixed regardless of which sections are present.
    pub fn ordinal(&self) -> u32 {
        match self {
            SectionKind::Background => 1,
            SectionKind::Observations => 2,
            SectionKind::Followups => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Paragraph(String),
    Outline(Vec<ResolvedLine>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSection {
    pub kind: SectionKind,
    pub heading: String,
    pub body: SectionBody,
}

/// One labelled value of the header info box.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoField {
    pub label: &'static str,
    pub value: String,
}

/// A visit with numbering resolved and photos planned.
///
/// Built once per export. Both backends walk the same instance, so section
/// labels, captions and slot geometry cannot diverge between formats.
#[derive(Debug, Clone)]
pub struct ReportModel<'a> {
    pub visit: &'a Visit,
    pub config: &'a ReportConfig,
    pub density: Density,
    /// Non-empty sections in document order.
    pub sections: Vec<ResolvedSection>,
    /// Empty when the visit has no photos.
    pub photo_pages: Vec<PhotoPage>,
}

impl<'a> ReportModel<'a> {
    pub fn build(visit: &'a Visit, config: &'a ReportConfig, density: Density) -> Self {
        let mut sections = Vec::with_capacity(3);

        let background = visit.background.trim();
        if !background.is_empty() {
            sections.push(ResolvedSection {
                kind: SectionKind::Background,
                heading: section_heading(config, SectionKind::Background),
                body: SectionBody::Paragraph(background.to_string()),
            });
        }

        for (kind, outline, style) in [
            (SectionKind::Observations, &visit.observations, config.observations_style),
            (SectionKind::Followups, &visit.followups, config.followups_style),
        ] {
            if let Some(section) = outline_section(config, kind, outline, style) {
                sections.push(section);
            }
        }

        let photo_pages = plan_photo_pages(&visit.photos, density, config.page.photo_grid_area());

        log::debug!(
            "Resolved report model: {} section(s), {} photo page(s)",
            sections.len(),
            photo_pages.len()
        );

        Self {
            visit,
            config,
            density,
            sections,
            photo_pages,
        }
    }

    pub fn has_photos(&self) -> bool {
        !self.photo_pages.is_empty()
    }

    pub fn photo(&self, slot: &PhotoSlot) -> Option<&'a Photo> {
        self.visit.photos.get(slot.photo_index)
    }

    /// Heading of a photo page: the base heading, suffixed on continued pages.
    pub fn photo_heading(&self, page: &PhotoPage) -> String {
        let base = &self.config.headings.photos;
        if page.continued {
            format!("{base} (continued)")
        } else {
            base.clone()
        }
    }

    /// Visit date as month/day/year without zero padding.
    pub fn visit_date_display(&self) -> String {
        self.visit.visit_date.format("%-m/%-d/%Y").to_string()
    }

    /// Left and right columns of the header info box.
    pub fn info_columns(&self) -> (Vec<InfoField>, Vec<InfoField>) {
        let field = |label, value: &str| InfoField {
            label,
            value: value.to_string(),
        };
        (
            vec![
                field("Client:", &self.visit.client_name),
                field("Site:", &self.visit.site_name),
                field("Project No.:", &self.visit.project_no),
            ],
            vec![
                field("Date:", &self.visit_date_display()),
                field("Prepared by:", &self.visit.prepared_by),
            ],
        )
    }
}

fn outline_section(
    config: &ReportConfig,
    kind: SectionKind,
    outline: &Outline,
    style: ListStyle,
) -> Option<ResolvedSection> {
    let lines = resolve_outline(outline.lines(), style);
    if lines.is_empty() {
        return None;
    }
    Some(ResolvedSection {
        kind,
        heading: section_heading(config, kind),
        body: SectionBody::Outline(lines),
    })
}

fn section_heading(config: &ReportConfig, kind: SectionKind) -> String {
    let headings = &config.headings;
    let title = match kind {
        SectionKind::Background => &headings.background,
        SectionKind::Observations => &headings.observations,
        SectionKind::Followups => &headings.followups,
    };
    match headings.numbering {
        Some(style) => format!("{}. {}", style.format(kind.ordinal()), title),
        None => title.clone(),
    }
}
