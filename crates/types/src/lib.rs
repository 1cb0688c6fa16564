pub mod color;
pub mod format;
pub mod geometry;
pub mod ids;
pub mod outline;
pub mod validation;
pub mod visit;

pub use color::Color;
pub use format::{Density, DensityError, ExportFormat};
pub use geometry::{PixelSize, Rect, Size};
pub use ids::{PhotoId, VisitId};
pub use outline::{Outline, OutlineLine};
pub use validation::ValidationError;
pub use visit::{Photo, Visit};
