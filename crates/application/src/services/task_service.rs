//! Task service
//!
//! The one use case of the gateway: CRUD over the task collection, with
//! the two boundary validations applied before anything reaches the store.

use std::{fmt, sync::Arc};

use domain::{TaskDocument, TaskId};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::TaskStorePort};

/// Service for task CRUD against the document store
pub struct TaskService {
    store: Arc<dyn TaskStorePort>,
}

impl fmt::Debug for TaskService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskService").finish_non_exhaustive()
    }
}

impl Clone for TaskService {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl TaskService {
    /// Create a new task service over a store adapter
    #[must_use]
    pub fn new(store: Arc<dyn TaskStorePort>) -> Self {
        Self { store }
    }

    /// Enumerate all tasks, injecting each document's identifier under key
    /// `id`. Order is whatever the store yields.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Value>, ApplicationError> {
        let stored = self.store.list().await?;
        debug!(count = stored.len(), "Fetched task collection");
        Ok(stored
            .into_iter()
            .map(|task| task.document.into_json_with_id(&task.id))
            .collect())
    }

    /// Validate and persist a new task, returning the store-assigned
    /// identifier. The store is never written to when validation fails.
    #[instrument(skip(self, document))]
    pub async fn add_task(&self, document: TaskDocument) -> Result<TaskId, ApplicationError> {
        document.validate_for_create()?;
        let id = self.store.add(document).await?;
        debug!(%id, "Task added");
        Ok(id)
    }

    /// Merge the supplied fields into the task at `id`. Only supplied
    /// fields change; a nonexistent identifier is tolerated.
    #[instrument(skip(self, document), fields(id = %id))]
    pub async fn update_task(
        &self,
        id: &TaskId,
        document: TaskDocument,
    ) -> Result<(), ApplicationError> {
        document.validate_for_update()?;
        self.store.update(id, document).await
    }

    /// Delete the task at `id`. Deleting a nonexistent identifier is not
    /// an error.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ApplicationError> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::ports::{MockTaskStorePort, StoredTask};

    fn document(value: Value) -> TaskDocument {
        let Value::Object(fields) = value else {
            unreachable!("test payloads are objects");
        };
        TaskDocument::new(fields)
    }

    #[tokio::test]
    async fn list_injects_ids_into_documents() {
        let mut store = MockTaskStorePort::new();
        store.expect_list().times(1).returning(|| {
            Ok(vec![
                StoredTask {
                    id: TaskId::parse("a").unwrap(),
                    document: document(json!({"task": "one"})),
                },
                StoredTask {
                    id: TaskId::parse("b").unwrap(),
                    document: document(json!({"task": "two", "done": true})),
                },
            ])
        });

        let service = TaskService::new(Arc::new(store));
        let tasks = service.list_tasks().await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert!(tasks.contains(&json!({"task": "one", "id": "a"})));
        assert!(tasks.contains(&json!({"task": "two", "done": true, "id": "b"})));
    }

    #[tokio::test]
    async fn add_returns_store_assigned_id() {
        let mut store = MockTaskStorePort::new();
        store
            .expect_add()
            .times(1)
            .returning(|_| Ok(TaskId::parse("new-id").unwrap()));

        let service = TaskService::new(Arc::new(store));
        let id = service
            .add_task(document(json!({"task": "buy milk"})))
            .await
            .unwrap();
        assert_eq!(id.as_str(), "new-id");
    }

    #[tokio::test]
    async fn add_with_falsy_task_never_touches_store() {
        let mut store = MockTaskStorePort::new();
        store.expect_add().times(0);

        let service = TaskService::new(Arc::new(store));
        let err = service
            .add_task(document(json!({"task": ""})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingTaskContent)
        ));
    }

    #[tokio::test]
    async fn update_with_empty_payload_never_touches_store() {
        let mut store = MockTaskStorePort::new();
        store.expect_update().times(0);

        let service = TaskService::new(Arc::new(store));
        let id = TaskId::parse("abc").unwrap();
        let err = service.update_task(&id, document(json!({}))).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::EmptyUpdate)
        ));
    }

    #[tokio::test]
    async fn update_passes_id_and_fields_through() {
        let mut store = MockTaskStorePort::new();
        let expected = TaskId::parse("abc").unwrap();
        store
            .expect_update()
            .with(eq(expected.clone()), eq(document(json!({"task": "revised"}))))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = TaskService::new(Arc::new(store));
        service
            .update_task(&expected, document(json!({"task": "revised"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_passes_through_even_for_unknown_id() {
        let mut store = MockTaskStorePort::new();
        store.expect_delete().times(1).returning(|_| Ok(()));

        let service = TaskService::new(Arc::new(store));
        let id = TaskId::parse("never-existed").unwrap();
        service.delete_task(&id).await.unwrap();
    }

    #[tokio::test]
    async fn store_failures_surface_unchanged() {
        let mut store = MockTaskStorePort::new();
        store
            .expect_list()
            .returning(|| Err(ApplicationError::Store("deadline exceeded".to_string())));

        let service = TaskService::new(Arc::new(store));
        let err = service.list_tasks().await.unwrap_err();
        assert_eq!(err.message(), "deadline exceeded");
    }
}
