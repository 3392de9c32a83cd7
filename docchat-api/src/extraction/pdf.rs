use crate::extraction::extractor::{ExtractionError, Extractor};
use crate::models::FileType;
use std::path::Path;

/// Concatenates the text of every page, in page order.
///
/// A page whose text cannot be extracted contributes nothing; only a
/// document that fails to load is an error.
#[derive(Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PdfExtractor {
    fn file_type(&self) -> FileType {
        FileType::Pdf
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let document = lopdf::Document::load(path)?;
        let pages = document.get_pages();

        let mut text = String::new();
        let mut skipped = 0usize;
        for page_number in pages.keys() {
            match document.extract_text(&[*page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(page = page_number, error = %e, "No extractable text on page");
                }
            }
        }

        tracing::debug!(
            page_count = pages.len(),
            skipped_pages = skipped,
            text_length = text.len(),
            "PDF text extraction completed"
        );

        Ok(text)
    }
}
