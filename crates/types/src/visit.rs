use crate::geometry::PixelSize;
use crate::ids::{PhotoId, VisitId};
use crate::outline::Outline;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One site-visit record, as handed to the rendering engine.
///
/// Externally owned: the engine borrows a snapshot for the duration of one
/// export and never mutates it. Photo order and outline line order are the
/// display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(default)]
    pub id: VisitId,
    pub client_name: String,
    pub site_name: String,
    pub project_no: String,
    pub visit_date: NaiveDate,
    pub prepared_by: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub observations: Outline,
    #[serde(default)]
    pub followups: Outline,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Visit {
    /// A visit with identity fields only; sections and photos empty.
    pub fn new(
        client_name: impl Into<String>,
        site_name: impl Into<String>,
        project_no: impl Into<String>,
        visit_date: NaiveDate,
        prepared_by: impl Into<String>,
    ) -> Self {
        Self {
            id: VisitId::default(),
            client_name: client_name.into(),
            site_name: site_name.into(),
            project_no: project_no.into(),
            visit_date,
            prepared_by: prepared_by.into(),
            background: String::new(),
            observations: Outline::default(),
            followups: Outline::default(),
            photos: Vec::new(),
        }
    }
}

/// Reference to one photo. Raster bytes live in the photo repository, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    /// Known pixel dimensions, if the acquisition step recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<PixelSize>,
}

impl Photo {
    pub fn new(id: impl Into<PhotoId>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            notes: String::new(),
            dimensions: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some(PixelSize::new(width, height));
        self
    }
}
