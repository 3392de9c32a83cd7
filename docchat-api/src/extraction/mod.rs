//! Plain-text extraction from uploaded files.
//!
//! Each supported [`FileType`] has one [`Extractor`]; the
//! [`ExtractorRegistry`] dispatches on the declared type and trims the
//! result. Extraction is blocking and is run on tokio's blocking pool by
//! [`extract_text`].

pub mod docx;
pub mod extractor;
pub mod pdf;
pub mod txt;

pub use docx::DocxExtractor;
pub use extractor::{ExtractionError, Extractor, ExtractorRegistry};
pub use pdf::PdfExtractor;
pub use txt::TxtExtractor;

use crate::models::FileType;
use std::path::PathBuf;
use std::sync::Arc;

/// Extracts text from `path` without blocking the async executor.
pub async fn extract_text(
    registry: Arc<ExtractorRegistry>,
    path: PathBuf,
    file_type: FileType,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || registry.extract(&path, file_type))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}
