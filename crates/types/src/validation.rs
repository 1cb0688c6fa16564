//! Identity-field checks applied at the upstream boundary before an export.

use crate::ids::PhotoId;
use crate::visit::Visit;
use thiserror::Error;

pub const MAX_CLIENT_NAME: usize = 100;
pub const MAX_SITE_NAME: usize = 100;
pub const MAX_PROJECT_NO: usize = 50;
pub const MAX_PREPARED_BY: usize = 100;
pub const MAX_PHOTO_DESCRIPTION: usize = 200;
pub const MAX_PHOTO_NOTES: usize = 500;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} too long ({len} characters, at most {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("photo '{photo}': {field} too long ({len} characters, at most {max})")]
    PhotoFieldTooLong {
        photo: PhotoId,
        field: &'static str,
        len: usize,
        max: usize,
    },
}

fn check_required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::FieldTooLong { field, len, max });
    }
    Ok(())
}

impl Visit {
    /// Checks the mandatory identity fields and photo text limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("Client name", &self.client_name, MAX_CLIENT_NAME)?;
        check_required("Site name", &self.site_name, MAX_SITE_NAME)?;
        check_required("Project No.", &self.project_no, MAX_PROJECT_NO)?;
        check_required("Prepared by", &self.prepared_by, MAX_PREPARED_BY)?;

        for photo in &self.photos {
            for (field, value, max) in [
                ("description", &photo.description, MAX_PHOTO_DESCRIPTION),
                ("notes", &photo.notes, MAX_PHOTO_NOTES),
            ] {
                let len = value.chars().count();
                if len > max {
                    return Err(ValidationError::PhotoFieldTooLong {
                        photo: photo.id.clone(),
                        field,
                        len,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}
