pub mod document;

pub use document::{Document, FileType, STATUS_COMPLETED};
