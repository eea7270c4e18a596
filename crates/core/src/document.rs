use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upload formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Txt,
    Pdf,
    Docx,
}

impl SourceFormat {
    /// Resolve the format from the filename's extension (case-insensitive).
    /// Returns the lowercased extension on failure so callers can report it.
    pub fn from_filename(filename: &str) -> Result<Self, String> {
        let ext = match filename.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        };
        match ext.as_str() {
            "txt" => Ok(SourceFormat::Txt),
            "pdf" => Ok(SourceFormat::Pdf),
            "docx" => Ok(SourceFormat::Docx),
            _ => Err(ext),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Txt => "txt",
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The extracted text of the currently loaded upload.
///
/// Immutable once built; a new upload replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub format: SourceFormat,
    pub text: String,
    pub loaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(filename: impl Into<String>, format: SourceFormat, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            format,
            text: text.into(),
            loaded_at: Utc::now(),
        }
    }
}
