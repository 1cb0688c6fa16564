//! Photo repositories for the visit report engine.
//!
//! ## Available Repositories
//!
//! - [`FilesystemPhotoRepository`]: loads `<dir>/<photo id>.<ext>` from local disk
//!
//! For convenience, the in-memory repository from visit-report-traits is
//! re-exported as well.

mod filesystem;

pub use filesystem::FilesystemPhotoRepository;

pub use visit_report_traits::InMemoryPhotoRepository;
