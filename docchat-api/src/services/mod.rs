pub mod chat;
pub mod metrics;
pub mod storage;
pub mod store;

pub use chat::{ChatAnswer, ChatEngine, StubChatEngine};
pub use self::metrics::{get_metrics, init_metrics};
pub use storage::{CleanupReport, LocalStorage, Storage};
pub use store::{DocumentStore, InMemoryDocumentStore};
