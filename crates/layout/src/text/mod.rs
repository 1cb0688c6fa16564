//! Text measurement and line breaking for the built-in PDF fonts.

mod metrics;
mod wrapper;

pub use metrics::{FontFace, char_width, measure_text};
pub use wrapper::{HangingLines, hanging_wrap, wrap_text};
