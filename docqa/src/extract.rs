//! Text extraction from document sources.
//!
//! Extractors return per-page text; [`flatten_pages`] turns that into the
//! single document string the segmenter consumes. Pages without text are
//! skipped, so a document with no extractable text yields an empty corpus
//! rather than an error.

use std::path::Path;

use tracing::debug;

use crate::document::DocumentSource;
use crate::error::{DocQaError, Result};

/// Produces per-page text for a document.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of every page, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DocQaError::ExtractionError`] if the document is malformed,
    /// or [`DocQaError::Io`] if it cannot be read.
    fn extract_pages(&self, source: &DocumentSource) -> Result<Vec<String>>;
}

/// Concatenate page texts with single spaces, skipping blank pages.
pub fn flatten_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn read_source(source: &DocumentSource) -> Result<Vec<u8>> {
    match source {
        DocumentSource::Path(path) => Ok(std::fs::read(path)?),
        DocumentSource::Bytes { data, .. } => Ok(data.clone()),
    }
}

/// Reads UTF-8 text, treating form feed (`\x0C`) as a page break.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_pages(&self, source: &DocumentSource) -> Result<Vec<String>> {
        let bytes = read_source(source)?;
        let text = String::from_utf8(bytes).map_err(|e| DocQaError::ExtractionError {
            source_name: source.display_name(),
            message: format!("not valid UTF-8 text: {e}"),
        })?;
        let pages: Vec<String> = text.split('\x0C').map(str::to_string).collect();
        debug!(source = %source.display_name(), pages = pages.len(), "read plain text");
        Ok(pages)
    }
}

/// Extracts PDF text page by page with `pdf-extract`.
///
/// This type is only available when the `pdf` feature is enabled.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[cfg(feature = "pdf")]
impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, source: &DocumentSource) -> Result<Vec<String>> {
        let name = source.display_name();
        let bytes = read_source(source)?;

        // pdf-extract panics on some malformed inputs.
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }));
        match outcome {
            Ok(Ok(pages)) => {
                debug!(source = %name, pages = pages.len(), "extracted PDF text");
                Ok(pages)
            }
            Ok(Err(e)) => Err(DocQaError::ExtractionError {
                source_name: name,
                message: format!("failed to parse PDF: {e}"),
            }),
            Err(payload) => {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(DocQaError::ExtractionError {
                    source_name: name,
                    message: format!("PDF parser panicked: {detail}"),
                })
            }
        }
    }
}

/// Picks an extractor from the file extension or the `%PDF` magic bytes.
///
/// PDFs go to [`PdfTextExtractor`]; everything else is read as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoExtractor;

impl AutoExtractor {
    fn is_pdf(source: &DocumentSource) -> bool {
        match source {
            DocumentSource::Path(path) => has_pdf_extension(path),
            DocumentSource::Bytes { name, data } => {
                data.starts_with(b"%PDF") || has_pdf_extension(Path::new(name))
            }
        }
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

impl TextExtractor for AutoExtractor {
    fn extract_pages(&self, source: &DocumentSource) -> Result<Vec<String>> {
        if Self::is_pdf(source) {
            #[cfg(feature = "pdf")]
            {
                return PdfTextExtractor.extract_pages(source);
            }
            #[cfg(not(feature = "pdf"))]
            {
                return Err(DocQaError::ExtractionError {
                    source_name: source.display_name(),
                    message: "PDF support is disabled (enable the `pdf` feature)".to_string(),
                });
            }
        }
        PlainTextExtractor.extract_pages(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_skips_blank_pages_and_joins_with_space() {
        let pages = ["First page text.", "", "   \n", "Third page text."];
        assert_eq!(flatten_pages(&pages), "First page text. Third page text.");
    }

    #[test]
    fn flatten_of_nothing_is_empty() {
        let pages: [&str; 0] = [];
        assert_eq!(flatten_pages(&pages), "");
    }

    #[test]
    fn plain_text_splits_on_form_feed() {
        let source = DocumentSource::from_bytes("notes.txt", "page one\x0Cpage two".as_bytes());
        let pages = PlainTextExtractor.extract_pages(&source).unwrap();
        assert_eq!(pages, vec!["page one", "page two"]);
    }

    #[test]
    fn plain_text_rejects_invalid_utf8() {
        let source = DocumentSource::from_bytes("bad.txt", vec![0xff, 0xfe, 0x00]);
        let err = PlainTextExtractor.extract_pages(&source).unwrap_err();
        assert!(matches!(err, DocQaError::ExtractionError { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = DocumentSource::from_path("/definitely/not/here.txt");
        let err = PlainTextExtractor.extract_pages(&source).unwrap_err();
        assert!(matches!(err, DocQaError::Io(_)));
    }

    #[test]
    fn auto_detects_pdf_by_magic_bytes() {
        let source = DocumentSource::from_bytes("upload", b"%PDF-1.7 garbage".to_vec());
        assert!(AutoExtractor::is_pdf(&source));
        let source = DocumentSource::from_bytes("upload.txt", b"plain".to_vec());
        assert!(!AutoExtractor::is_pdf(&source));
        assert!(AutoExtractor::is_pdf(&DocumentSource::from_path("Report.PDF")));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn malformed_pdf_fails_the_load() {
        let source = DocumentSource::from_bytes("broken.pdf", b"%PDF-1.7 not really a pdf".to_vec());
        let err = AutoExtractor.extract_pages(&source).unwrap_err();
        assert!(matches!(err, DocQaError::ExtractionError { .. }));
    }
}
