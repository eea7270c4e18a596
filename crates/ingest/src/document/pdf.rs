use super::{ExtractionError, PageContent};

pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let texts = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    // Pages without a text layer stay as empty entries so numbering holds.
    let pages: Vec<PageContent> = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageContent {
            page_number: i + 1,
            text,
        })
        .collect();

    let empty = pages.iter().filter(|p| p.text.trim().is_empty()).count();
    if empty > 0 {
        tracing::warn!(
            "PDF has {} of {} pages without extractable text (scanned or image-only?)",
            empty,
            pages.len()
        );
    }

    Ok(pages)
}
