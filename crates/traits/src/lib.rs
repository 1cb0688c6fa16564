pub mod photos;

pub use photos::{InMemoryPhotoRepository, PhotoRepository, RepositoryError, SharedPhotoData};
