use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatMessage {
    #[validate(length(min = 1, message = "session_id must not be empty"))]
    pub session_id: String,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    /// Ids of uploaded documents the answer should draw on.
    #[serde(default)]
    pub context_documents: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub sources: Vec<Value>,
    pub confidence_score: f64,
    /// Seconds spent handling the message.
    pub processing_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_documents_are_optional() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"session_id":"s1","message":"hi"}"#).unwrap();
        assert!(msg.context_documents.is_none());
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn empty_message_fails_validation() {
        let msg = ChatMessage {
            session_id: "s1".into(),
            message: String::new(),
            context_documents: None,
        };
        let errors = msg.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("message"));
    }
}
