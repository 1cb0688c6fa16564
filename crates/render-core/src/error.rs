use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF serialization error: {0}")]
    Serialize(String),
    #[error("Document packaging error: {0}")]
    Packaging(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
