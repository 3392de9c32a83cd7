pub mod chat;
pub mod documents;

pub use chat::{ChatMessage, ChatResponse};
pub use documents::{DeleteResponse, DocumentListResponse, DocumentResponse};
