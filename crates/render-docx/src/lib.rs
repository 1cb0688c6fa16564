//! Document-tree backend for visit reports.
//!
//! The report model is first lowered into a small word-processing tree
//! (`tree`), then serialized as WordprocessingML parts and zipped into a
//! `.docx` package (`package`). Outline labels use native list numbering,
//! with one numbering instance per counted paragraph so the host shows
//! exactly the resolved ordinal.

mod numbering;
mod package;
mod renderer;
pub mod tree;
mod units;
mod xml;

pub use renderer::DocxReportRenderer;
pub use tree::{Block, DocTree, Inline, ListMarker};
