//! Core rendering abstractions for visit reports.
//!
//! This crate provides the pieces every output backend shares:
//! - `ReportModel`, the fully resolved document both backends render
//! - `ReportRenderer` trait for abstracting the output format
//! - `ReportConfig` with theme, page geometry and heading labels
//! - Photo decoding with the per-photo failure placeholder
//! - Error types for rendering operations

mod config;
mod error;
mod model;
mod photo;
mod traits;
pub mod utils;

pub use config::{HeadingConfig, PageGeometry, ReportConfig, Theme};
pub use error::RenderError;
pub use model::{InfoField, ReportModel, ResolvedSection, SectionBody, SectionKind};
pub use photo::{DecodedPhoto, PhotoFailure, PhotoFormat, load_photo, photo_placeholder};
pub use traits::ReportRenderer;
