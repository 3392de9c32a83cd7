use crate::models::Document;
use async_trait::async_trait;
use dashmap::DashMap;
use service_core::error::AppError;

/// Metadata store for document records.
///
/// Handlers only talk to this trait, so a persistent backend can replace
/// [`InMemoryDocumentStore`] without touching request handling.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts the record, replacing any record with the same id.
    async fn put(&self, document: Document) -> Result<(), AppError>;
    async fn get(&self, id: &str) -> Result<Option<Document>, AppError>;
    /// Removes the record and returns it, if it existed.
    async fn delete(&self, id: &str) -> Result<Option<Document>, AppError>;
    /// All records, oldest upload first.
    async fn list(&self) -> Result<Vec<Document>, AppError>;
}

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<String, Document>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, document: Document) -> Result<(), AppError> {
        self.documents.insert(document.id.clone(), document);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self.documents.get(id).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self.documents.remove(id).map(|(_, document)| document))
    }

    async fn list(&self) -> Result<Vec<Document>, AppError> {
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        documents.sort_by(|a, b| {
            a.upload_timestamp
                .cmp(&b.upload_timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(documents)
    }
}
