mod docx;
mod pdf;
mod txt;

use docubot_core::{Document, SourceFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: '{0}' (expected .txt, .pdf or .docx)")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("DOCX extraction failed: {0}")]
    DocxError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number (for PDFs). For TXT/DOCX, always 1.
    pub page_number: usize,
    /// The extracted text content; empty for pages without a text layer.
    pub text: String,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    pub format: SourceFormat,
    /// Extracted pages in document order.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// All page texts concatenated in page order.
    pub fn full_text(&self) -> String {
        self.pages.iter().map(|p| p.text.as_str()).collect()
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }

    pub fn into_document(self) -> Document {
        let text = self.full_text();
        Document::new(self.filename, self.format, text)
    }
}

/// Extract text from file bytes based on the filename's extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let format = SourceFormat::from_filename(filename).map_err(ExtractionError::UnsupportedType)?;

    let pages = match format {
        SourceFormat::Pdf => pdf::extract_pdf(bytes)?,
        SourceFormat::Txt => txt::extract_txt(bytes)?,
        SourceFormat::Docx => docx::extract_docx(bytes)?,
    };

    tracing::debug!(filename, %format, pages = pages.len(), "extracted document text");

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        format,
        pages,
    })
}
