use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TXT_MIME: &str = "text/plain";

/// The only status a stored record can carry: records exist only after extraction succeeded.
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl FileType {
    /// Maps a declared content type onto the upload allow-set.
    ///
    /// Only the media type essence is compared, so `text/plain; charset=utf-8`
    /// is accepted as `txt`.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Some(FileType::Pdf),
            DOCX_MIME => Some(FileType::Docx),
            TXT_MIME => Some(FileType::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Txt => "txt",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: u64,
    pub upload_timestamp: DateTime<Utc>,
    pub processing_status: String,
    pub extracted_text_length: u64,
}

impl Document {
    /// Builds the record for an upload whose text has been extracted.
    pub fn completed(
        id: String,
        filename: String,
        file_type: FileType,
        file_size: u64,
        extracted_text: &str,
    ) -> Self {
        Self {
            id,
            filename,
            file_type,
            file_size,
            upload_timestamp: Utc::now(),
            processing_status: STATUS_COMPLETED.to_string(),
            extracted_text_length: extracted_text.chars().count() as u64,
        }
    }

    /// Prefix shared by every file on disk that belongs to this document.
    pub fn file_prefix(id: &str) -> String {
        format!("{}_", id)
    }

    /// On-disk name of an uploaded file: `{id}_{filename}`.
    pub fn stored_file_name(id: &str, filename: &str) -> String {
        format!("{}{}", Self::file_prefix(id), filename)
    }
}
