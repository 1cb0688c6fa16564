//! Filesystem-backed photo repository.
//!
//! Photos are stored flat in one directory as `<photo id>.<ext>`. Ids are
//! treated as file stems only: anything that could leave the directory
//! (separators, `..`, absolute paths) is reported as not found.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use visit_report_traits::{PhotoRepository, RepositoryError, SharedPhotoData};
use visit_report_types::PhotoId;

/// Extensions tried, in order, for each photo id.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

#[derive(Debug)]
pub struct FilesystemPhotoRepository {
    base_path: PathBuf,
}

impl FilesystemPhotoRepository {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// False for ids that are not a single plain path component.
    fn is_plain_stem(id: &PhotoId) -> bool {
        let raw = id.as_str();
        if raw.is_empty() || raw.contains('/') || raw.contains('\\') {
            return false;
        }
        let mut components = Path::new(raw).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }

    /// First existing `<base>/<id>.<ext>`, if any.
    fn resolve(&self, id: &PhotoId) -> Option<PathBuf> {
        if !Self::is_plain_stem(id) {
            log::warn!("Rejected photo id '{}' (not a plain file stem)", id);
            return None;
        }
        PHOTO_EXTENSIONS
            .iter()
            .map(|ext| self.base_path.join(format!("{}.{}", id.as_str(), ext)))
            .find(|candidate| candidate.is_file())
    }
}

impl PhotoRepository for FilesystemPhotoRepository {
    fn load(&self, id: &PhotoId) -> Result<SharedPhotoData, RepositoryError> {
        let path = self
            .resolve(id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;

        std::fs::read(&path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RepositoryError::NotFound(id.clone())
            } else {
                RepositoryError::LoadFailed {
                    id: id.clone(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn contains(&self, id: &PhotoId) -> bool {
        self.resolve(id).is_some()
    }

    fn name(&self) -> &'static str {
        "FilesystemPhotoRepository"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_filesystem_repository_loads_by_stem() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("p1.jpg"), b"jpeg bytes").unwrap();

        let repo = FilesystemPhotoRepository::new(dir.path());
        let data = repo.load(&PhotoId::new("p1")).unwrap();
        assert_eq!(&*data, b"jpeg bytes");
    }

    #[test]
    fn test_filesystem_repository_tries_each_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("scan.png"), b"png bytes").unwrap();

        let repo = FilesystemPhotoRepository::new(dir.path());
        assert!(repo.contains(&PhotoId::new("scan")));
        assert_eq!(&*repo.load(&PhotoId::new("scan")).unwrap(), b"png bytes");
    }

    #[test]
    fn test_filesystem_repository_not_found() {
        let dir = tempdir().unwrap();
        let repo = FilesystemPhotoRepository::new(dir.path());

        let result = repo.load(&PhotoId::new("missing"));
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_filesystem_repository_blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("inner");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("secret.jpg"), b"x").unwrap();

        let repo = FilesystemPhotoRepository::new(&nested);
        assert!(!repo.contains(&PhotoId::new("../secret")));
        assert!(!repo.contains(&PhotoId::new("..")));
        assert!(!repo.contains(&PhotoId::new("/etc/passwd")));
        assert!(repo.load(&PhotoId::new("../secret")).is_err());
    }
}
