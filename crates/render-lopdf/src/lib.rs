//! PDF backend for visit reports using lopdf.
//!
//! The renderer walks a `ReportModel` top to bottom with a single cursor,
//! breaking pages when a block would run into the footer band, and stamps
//! `Page X of Y` footers once the page count is known.

mod canvas;
mod flow;
mod renderer;

pub use renderer::PdfReportRenderer;
