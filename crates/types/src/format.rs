use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two output backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Coordinate-painted, manually paginated document.
    Pdf,
    /// Flowed WordprocessingML document tree, paginated by the host.
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(format!("unknown export format '{}', expected pdf or docx", other)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported photo density {0}, expected 2 or 6")]
pub struct DensityError(pub u8);

/// Number of photos placed on one output page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Density {
    /// One column, two rows, large cells.
    Two,
    /// Two columns, three rows.
    #[default]
    Six,
}

impl Density {
    pub fn photos_per_page(&self) -> usize {
        match self {
            Density::Two => 2,
            Density::Six => 6,
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            Density::Two => 1,
            Density::Six => 2,
        }
    }

    pub fn rows(&self) -> usize {
        self.photos_per_page() / self.columns()
    }
}

impl TryFrom<u8> for Density {
    type Error = DensityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Density::Two),
            6 => Ok(Density::Six),
            other => Err(DensityError(other)),
        }
    }
}

impl From<Density> for u8 {
    fn from(density: Density) -> Self {
        density.photos_per_page() as u8
    }
}

impl FromStr for Density {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("density must be a number, got '{}'", s))?;
        Density::try_from(value).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_grid_shapes() {
        assert_eq!((Density::Six.columns(), Density::Six.rows()), (2, 3));
        assert_eq!((Density::Two.columns(), Density::Two.rows()), (1, 2));
    }

    #[test]
    fn density_only_accepts_two_or_six() {
        assert_eq!(Density::try_from(2), Ok(Density::Two));
        assert_eq!(Density::try_from(6), Ok(Density::Six));
        assert_eq!(Density::try_from(4), Err(DensityError(4)));
        assert!("3".parse::<Density>().is_err());
        assert!(serde_json::from_str::<Density>("5").is_err());
        assert_eq!(serde_json::from_str::<Density>("2").unwrap(), Density::Two);
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("PDF".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
        assert_eq!("docx".parse::<ExportFormat>(), Ok(ExportFormat::Docx));
        assert!("odt".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Docx.extension(), "docx");
    }
}
