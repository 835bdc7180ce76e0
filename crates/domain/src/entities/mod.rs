//! Entities

mod task_document;

pub use task_document::TaskDocument;
