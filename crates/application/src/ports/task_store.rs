//! Document store port
//!
//! Defines the interface to the external document database holding the
//! task collection. The integration layer implements this against the
//! Firestore REST API; tests substitute an in-memory fake.

use async_trait::async_trait;
use domain::{TaskDocument, TaskId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A document as enumerated from the store: its assigned identifier plus
/// the attribute mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTask {
    /// Store-assigned identifier
    pub id: TaskId,
    /// Attribute mapping persisted under that identifier
    pub document: TaskDocument,
}

/// Port for task document persistence
///
/// Contract notes: `add` returns the identifier the store assigned;
/// `update` merges only the supplied fields into the addressed document and
/// tolerates a nonexistent identifier (silent upsert or no-op, per the
/// store's semantics); `delete` of a nonexistent identifier succeeds.
/// Enumeration order from `list` is whatever the store yields.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskStorePort: Send + Sync {
    /// Enumerate every document in the collection
    async fn list(&self) -> Result<Vec<StoredTask>, ApplicationError>;

    /// Persist a new document, returning the assigned identifier
    async fn add(&self, document: TaskDocument) -> Result<TaskId, ApplicationError>;

    /// Merge the supplied fields into an existing document
    async fn update(&self, id: &TaskId, document: TaskDocument)
    -> Result<(), ApplicationError>;

    /// Remove the document at the identifier
    async fn delete(&self, id: &TaskId) -> Result<(), ApplicationError>;
}
