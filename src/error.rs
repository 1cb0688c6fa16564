// src/error.rs
use thiserror::Error;
use visit_report_render_core::RenderError;
use visit_report_types::ValidationError;

/// A comprehensive error type for one report export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Visit is not exportable: {0}")]
    InvalidVisit(#[from] ValidationError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
