//! Newtype wrappers for record identifiers.
//!
//! Keeps photo ids (which key into the photo repository) from being mixed up
//! with visit ids at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a single visit record.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(Arc<str>);

impl VisitId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VisitId {
    fn default() -> Self {
        Self("".into())
    }
}

impl From<&str> for VisitId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a photo; the key used to fetch its raster bytes.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(Arc<str>);

impl PhotoId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PhotoId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for PhotoId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for PhotoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
