use super::{ExtractionError, PageContent};

pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    // Invalid sequences become U+FFFD rather than failing the upload.
    let text = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                valid_up_to = e.utf8_error().valid_up_to(),
                "text upload is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    Ok(vec![PageContent {
        page_number: 1,
        text,
    }])
}
