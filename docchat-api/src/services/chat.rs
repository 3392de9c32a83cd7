use crate::models::Document;
use async_trait::async_trait;
use serde_json::{json, Value};
use service_core::error::AppError;

/// What a chat engine produces for one message.
#[derive(Debug, Clone)]
pub struct ChatAnswer {
    pub response: String,
    pub sources: Vec<Value>,
    /// Expected in `[0, 1]`; the handler clamps whatever is returned.
    pub confidence_score: f64,
}

/// Answers a user message in the context of already-resolved documents.
#[async_trait]
pub trait ChatEngine: Send + Sync {
    async fn respond(
        &self,
        session_id: &str,
        message: &str,
        documents: &[Document],
    ) -> Result<ChatAnswer, AppError>;
}

/// Placeholder engine used until a retrieval backend is wired in.
///
/// It cites the context documents it was given and reports zero confidence.
#[derive(Default)]
pub struct StubChatEngine;

pub const STUB_RESPONSE: &str =
    "No answering engine is configured for this service; the referenced documents are listed as sources.";

#[async_trait]
impl ChatEngine for StubChatEngine {
    async fn respond(
        &self,
        session_id: &str,
        _message: &str,
        documents: &[Document],
    ) -> Result<ChatAnswer, AppError> {
        tracing::debug!(
            session_id = %session_id,
            context_documents = documents.len(),
            "Stub chat engine answering"
        );

        let sources = documents
            .iter()
            .map(|doc| {
                json!({
                    "document_id": doc.id,
                    "filename": doc.filename,
                    "file_type": doc.file_type,
                })
            })
            .collect();

        Ok(ChatAnswer {
            response: STUB_RESPONSE.to_string(),
            sources,
            confidence_score: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileType;

    #[tokio::test]
    async fn stub_cites_every_context_document() {
        let docs = vec![
            Document::completed("a".into(), "a.txt".into(), FileType::Txt, 1, "x"),
            Document::completed("b".into(), "b.pdf".into(), FileType::Pdf, 1, "y"),
        ];

        let answer = StubChatEngine
            .respond("session-1", "what changed?", &docs)
            .await
            .unwrap();

        assert_eq!(answer.sources.len(), 2);
        assert_eq!(answer.sources[0]["document_id"], "a");
        assert_eq!(answer.sources[1]["file_type"], "pdf");
        assert_eq!(answer.confidence_score, 0.0);
    }
}
