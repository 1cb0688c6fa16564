//! PhotoRepository trait for abstracting photo storage.
//!
//! The rendering engine never reaches for a global photo store: whoever
//! starts an export hands in a repository, and renderers fetch raster bytes
//! through it one slot at a time.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use visit_report_types::PhotoId;

/// Error type for photo lookups.
#[derive(Error, Debug, Clone)]
pub enum RepositoryError {
    #[error("Photo not found: {0}")]
    NotFound(PhotoId),

    #[error("Failed to load photo '{id}': {message}")]
    LoadFailed { id: PhotoId, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Io(err.to_string())
    }
}

/// Raster bytes shared without copying.
pub type SharedPhotoData = Arc<Vec<u8>>;

/// Read-only access to photo raster bytes, keyed by photo id.
///
/// Bytes are expected in a directly decodable encoding (JPEG, PNG, GIF);
/// format conversion happens before photos reach the repository.
///
/// # Implementations
///
/// - `InMemoryPhotoRepository`: pre-populated map, used by tests and embedders
/// - `FilesystemPhotoRepository` (visit-report-resource): `<dir>/<id>.<ext>`
pub trait PhotoRepository: Send + Sync + Debug {
    /// Load the raster bytes for `id`.
    fn load(&self, id: &PhotoId) -> Result<SharedPhotoData, RepositoryError>;

    /// Check if a photo exists.
    fn contains(&self, id: &PhotoId) -> bool;

    /// Returns a human-readable name for this repository (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory photo repository.
#[derive(Debug, Default)]
pub struct InMemoryPhotoRepository {
    photos: RwLock<HashMap<PhotoId, SharedPhotoData>>,
}

impl InMemoryPhotoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the bytes stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::LoadFailed` if the internal lock is poisoned.
    pub fn insert(&self, id: impl Into<PhotoId>, data: Vec<u8>) -> Result<(), RepositoryError> {
        let id = id.into();
        let mut photos = self.photos.write().map_err(|_| RepositoryError::LoadFailed {
            id: id.clone(),
            message: "photo store lock poisoned".to_string(),
        })?;
        photos.insert(id, Arc::new(data));
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert) for fixtures.
    pub fn with_photo(self, id: impl Into<PhotoId>, data: Vec<u8>) -> Self {
        if let Ok(mut photos) = self.photos.write() {
            photos.insert(id.into(), Arc::new(data));
        }
        self
    }

    /// Remove a photo from the store.
    ///
    /// Returns `None` if the lock is poisoned or the photo doesn't exist.
    pub fn remove(&self, id: &PhotoId) -> Option<SharedPhotoData> {
        self.photos.write().ok()?.remove(id)
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.photos.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PhotoRepository for InMemoryPhotoRepository {
    fn load(&self, id: &PhotoId) -> Result<SharedPhotoData, RepositoryError> {
        let photos = self.photos.read().map_err(|_| RepositoryError::LoadFailed {
            id: id.clone(),
            message: "photo store lock poisoned".to_string(),
        })?;
        photos
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    fn contains(&self, id: &PhotoId) -> bool {
        self.photos
            .read()
            .map(|p| p.contains_key(id))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryPhotoRepository"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_insert_and_load() {
        let repo = InMemoryPhotoRepository::new();
        repo.insert("p1", b"raster".to_vec()).unwrap();

        let data = repo.load(&PhotoId::new("p1")).unwrap();
        assert_eq!(&*data, b"raster");
    }

    #[test]
    fn test_in_memory_not_found() {
        let repo = InMemoryPhotoRepository::new();
        let result = repo.load(&PhotoId::new("missing"));
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_in_memory_overwrite() {
        let repo = InMemoryPhotoRepository::new()
            .with_photo("p1", b"original".to_vec())
            .with_photo("p1", b"updated".to_vec());

        assert_eq!(&*repo.load(&PhotoId::new("p1")).unwrap(), b"updated");
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_in_memory_remove() {
        let repo = InMemoryPhotoRepository::new().with_photo("p1", vec![1]);
        let id = PhotoId::new("p1");

        assert!(repo.contains(&id));
        assert_eq!(repo.remove(&id).as_deref(), Some(&vec![1]));
        assert!(!repo.contains(&id));
        assert!(repo.remove(&id).is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::NotFound(PhotoId::new("p9"));
        assert!(err.to_string().contains("p9"));

        let err = RepositoryError::LoadFailed {
            id: PhotoId::new("p2"),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("p2"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_repository_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RepositoryError = io_err.into();
        assert!(matches!(err, RepositoryError::Io(_)));
    }
}
