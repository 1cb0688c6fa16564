//! Outline sections (observations, follow-ups) at the model boundary.
//!
//! Stored records encode a bullet line as a leading tab or a leading run of
//! four spaces inside one free-text field. Both encodings are accepted here
//! and turned into explicit `{text, is_bullet}` lines; nothing downstream
//! looks at leading whitespace again.

use serde::{Deserialize, Deserializer, Serialize};

const TAB_MARKER: char = '\t';
const SPACE_MARKER: &str = "    ";

/// One entry of an outline section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineLine {
    pub text: String,
    #[serde(default)]
    pub is_bullet: bool,
}

impl OutlineLine {
    pub fn numbered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bullet: false,
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bullet: true,
        }
    }

    /// Decodes one stored line: the bullet flag from the leading marker, the
    /// text with all leading whitespace (and a trailing `\r`) removed.
    pub fn from_stored(raw: &str) -> Self {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let is_bullet = raw.starts_with(TAB_MARKER) || raw.starts_with(SPACE_MARKER);
        Self {
            text: raw.trim_start().to_string(),
            is_bullet,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An ordered outline section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Outline(pub Vec<OutlineLine>);

impl Outline {
    pub fn new(lines: Vec<OutlineLine>) -> Self {
        Self(lines)
    }

    /// Parses the stored free-text encoding, one line per `\n`.
    pub fn from_stored(stored: &str) -> Self {
        Self(stored.split('\n').map(OutlineLine::from_stored).collect())
    }

    /// The stored encoding; bullets are written with the tab marker.
    pub fn to_stored(&self) -> String {
        self.0
            .iter()
            .map(|line| {
                if line.is_bullet {
                    format!("{}{}", TAB_MARKER, line.text)
                } else {
                    line.text.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn lines(&self) -> &[OutlineLine] {
        &self.0
    }

    /// True when no line carries visible text.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(OutlineLine::is_blank)
    }
}

impl From<&str> for Outline {
    fn from(stored: &str) -> Self {
        Outline::from_stored(stored)
    }
}

impl<'de> Deserialize<'de> for Outline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OutlineDef {
            Stored(String),
            Lines(Vec<OutlineLine>),
        }

        Ok(match OutlineDef::deserialize(deserializer)? {
            OutlineDef::Stored(s) => Outline::from_stored(&s),
            OutlineDef::Lines(lines) => Outline(lines),
        })
    }
}
