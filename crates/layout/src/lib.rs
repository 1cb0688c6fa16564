//! Pure layout functions shared by every report backend.
//!
//! - [`outline`]: per-line labels for observation and follow-up sections
//! - [`photos`]: partitioning of the photo list into pages and grid slots
//! - [`text`]: Helvetica metrics and width-constrained line breaking
//!
//! Backends consume these outputs as-is. Neither backend numbers lines or
//! places photos on its own, which is what keeps the two outputs in step.

pub mod outline;
pub mod photos;
pub mod text;

pub use outline::{Label, ListStyle, ResolvedLine, resolve_outline};
pub use photos::{GridArea, PhotoPage, PhotoSlot, photo_caption, photo_notes_excerpt, plan_photo_pages};
pub use text::{FontFace, HangingLines, char_width, hanging_wrap, measure_text, wrap_text};

// Re-export geometry types used by slots to prevent type mismatches
pub use visit_report_types::geometry::{PixelSize, Rect, Size};

#[cfg(test)]
mod photos_test;
