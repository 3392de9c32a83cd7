use crate::models::FileType;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to parse DOCX: {0}")]
    Docx(String),

    #[error("no extractor registered for {0}")]
    Unsupported(FileType),

    #[error("extraction task failed: {0}")]
    Task(String),
}

pub trait Extractor: Send + Sync {
    fn file_type(&self) -> FileType;

    /// Returns the untrimmed text of the file at `path`.
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        use crate::extraction::{DocxExtractor, PdfExtractor, TxtExtractor};

        Self {
            extractors: vec![
                Box::new(PdfExtractor::new()),
                Box::new(DocxExtractor::new()),
                Box::new(TxtExtractor::new()),
            ],
        }
    }

    pub fn find_extractor(&self, file_type: FileType) -> Option<&dyn Extractor> {
        self.extractors
            .iter()
            .find(|e| e.file_type() == file_type)
            .map(|b| b.as_ref())
    }

    /// Extracts and trims the text of `path`, read as `file_type`.
    pub fn extract(&self, path: &Path, file_type: FileType) -> Result<String, ExtractionError> {
        let extractor = self
            .find_extractor(file_type)
            .ok_or(ExtractionError::Unsupported(file_type))?;

        let text = extractor.extract(path)?;

        tracing::debug!(
            path = ?path,
            file_type = %file_type,
            raw_length = text.len(),
            "Text extracted"
        );

        Ok(text.trim().to_string())
    }
}
