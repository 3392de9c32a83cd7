use crate::models::{Document, FileType};
use serde::{Deserialize, Serialize};

/// Wire form of a document record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentResponse {
    pub id: String,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: u64,
    pub upload_timestamp: String,
    pub processing_status: String,
    pub extracted_text_length: u64,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename,
            file_type: doc.file_type,
            file_size: doc.file_size,
            upload_timestamp: doc.upload_timestamp.to_rfc3339(),
            processing_status: doc.processing_status,
            extracted_text_length: doc.extracted_text_length,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
