use crate::extraction::extractor::{ExtractionError, Extractor};
use crate::models::FileType;
use std::path::Path;

/// Reads the file as UTF-8, dropping malformed byte sequences.
#[derive(Default)]
pub struct TxtExtractor;

impl TxtExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for TxtExtractor {
    fn file_type(&self) -> FileType {
        FileType::Txt
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(normalize_newlines(&decode_valid_utf8(&bytes)))
    }
}

/// Keeps every valid UTF-8 run and skips the invalid bytes between them.
fn decode_valid_utf8(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
