use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use super::{ExtractionError, PageContent};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from a Word document, one line per paragraph.
pub fn extract_docx(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::DocxError(format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::DocxError(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    let paragraphs = paragraphs_from_xml(&xml)?;

    Ok(vec![PageContent {
        page_number: 1,
        text: paragraphs.join("\n"),
    }])
}

/// Walk WordprocessingML and collect the text of each `w:p`.
///
/// Paragraphs nested in text boxes get their own buffer and are emitted when
/// they close, ahead of the paragraph that contains them. Tab and break
/// markers only count inside a run; under `w:pPr` they are tab-stop
/// definitions, not content.
fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut props_depth = 0usize;
    let mut in_text_node = false;

    loop {
        let in_run = run_depth > 0 && props_depth == 0;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:r" => run_depth += 1,
                b"w:pPr" => props_depth += 1,
                b"w:t" => in_text_node = true,
                b"w:tab" if in_run => push_to(&mut open, "\t"),
                b"w:br" | b"w:cr" if in_run => push_to(&mut open, "\n"),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_run => push_to(&mut open, "\t"),
                b"w:br" | b"w:cr" if in_run => push_to(&mut open, "\n"),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text_node {
                    let value = e
                        .unescape()
                        .map_err(|err| ExtractionError::DocxError(err.to_string()))?;
                    push_to(&mut open, &value);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_node = false,
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:pPr" => props_depth = props_depth.saturating_sub(1),
                b"w:p" => {
                    if let Some(done) = open.pop() {
                        paragraphs.push(done);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ExtractionError::DocxError(format!(
                    "malformed document XML at byte {}: {err}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_to(open: &mut [String], text: &str) {
    if let Some(current) = open.last_mut() {
        current.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .expect("zip start file");
        zip.write_all(xml.as_bytes()).expect("write xml");
        zip.finish().expect("finish zip").into_inner()
    }

    #[test]
    fn paragraphs_joined_by_newline() {
        let bytes = build_docx(
            "<w:p><w:r><w:t>Hello</w:t></w:r></w:p><w:p><w:r><w:t>World</w:t></w:r></w:p>",
        );
        let pages = extract_docx(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "Hello\nWorld");
    }

    #[test]
    fn runs_within_paragraph_are_concatenated() {
        let bytes = build_docx(
            r#"<w:p><w:r><w:t xml:space="preserve">Terms </w:t></w:r><w:r><w:t>&amp; Conditions</w:t></w:r></w:p>"#,
        );
        let pages = extract_docx(&bytes).unwrap();
        assert_eq!(pages[0].text, "Terms & Conditions");
    }

    #[test]
    fn empty_paragraphs_keep_their_line() {
        let bytes = build_docx("<w:p><w:r><w:t>A</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>B</w:t></w:r></w:p>");
        let pages = extract_docx(&bytes).unwrap();
        assert_eq!(pages[0].text, "A\n\nB");
    }

    #[test]
    fn tabs_and_breaks_are_preserved() {
        let bytes = build_docx("<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>");
        let pages = extract_docx(&bytes).unwrap();
        assert_eq!(pages[0].text, "a\tb\nc");
    }

    #[test]
    fn tab_stop_definitions_are_not_content() {
        let bytes = build_docx(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/><w:tab w:val="right" w:leader="dot" w:pos="9350"/></w:tabs></w:pPr><w:r><w:t>Clause 1</w:t></w:r></w:p>"#,
        );
        let pages = extract_docx(&bytes).unwrap();
        assert_eq!(pages[0].text, "Clause 1");
    }

    #[test]
    fn text_box_paragraph_keeps_outer_text() {
        let bytes = build_docx(
            r#"<w:p><w:r><w:t xml:space="preserve">Outer before </w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:pict></w:r><w:r><w:t>outer after</w:t></w:r></w:p><w:p><w:r><w:t>Next</w:t></w:r></w:p>"#,
        );
        let pages = extract_docx(&bytes).unwrap();
        assert_eq!(pages[0].text, "Box\nOuter before outer after\nNext");
    }

    #[test]
    fn non_zip_bytes_are_rejected() {
        let err = extract_docx(b"plain text pretending").unwrap_err();
        assert!(matches!(err, ExtractionError::DocxError(_)));
    }

    #[test]
    fn archive_without_document_part_is_rejected() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/styles.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = extract_docx(&bytes).unwrap_err();
        assert!(matches!(err, ExtractionError::DocxError(ref msg) if msg.contains(DOCUMENT_PART)));
    }
}
