use crate::extraction::extractor::{ExtractionError, Extractor};
use crate::models::FileType;
use docx_rust::document::BodyContent;
use docx_rust::DocxFile;
use std::path::Path;

/// Emits each body paragraph followed by a newline.
#[derive(Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for DocxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Docx
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let file =
            DocxFile::from_file(path).map_err(|e| ExtractionError::Docx(e.to_string()))?;
        let docx = file.parse().map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let mut text = String::new();
        let mut paragraphs = 0usize;
        for content in &docx.document.body.content {
            if let BodyContent::Paragraph(paragraph) = content {
                text.push_str(&paragraph.text());
                text.push('\n');
                paragraphs += 1;
            }
        }

        tracing::debug!(paragraphs, text_length = text.len(), "DOCX text extraction completed");

        Ok(text)
    }
}
