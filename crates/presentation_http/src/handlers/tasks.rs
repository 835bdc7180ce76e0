//! Task CRUD handlers
//!
//! Bodies are read as raw bytes and parsed explicitly: a malformed JSON
//! body on create must surface as a 500 with the store template, which an
//! extractor rejection (4xx) would not produce.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{DomainError, TaskDocument, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::{
    error::{ApiError, TaskAction},
    state::AppState,
};

/// Body of a successful create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreatedResponse {
    pub message: String,
    pub id: String,
}

/// Body of a successful update or delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /tasks` - enumerate the collection
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let tasks = state.task_service.list_tasks().await.map_err(|e| {
        warn!(error = %e, "Task listing failed");
        ApiError::from_application(TaskAction::Fetch, e)
    })?;
    Ok(Json(tasks))
}

/// `POST /tasks` - create a task from the request body
pub async fn add_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TaskCreatedResponse>), ApiError> {
    let document = parse_document(&body, TaskAction::Add)?;

    let id = state.task_service.add_task(document).await.map_err(|e| {
        let mapped = ApiError::from_application(TaskAction::Add, e);
        if let ApiError::Store { message, .. } = &mapped {
            error!(error = %message, "Error adding task");
        }
        mapped
    })?;

    Ok((
        StatusCode::CREATED,
        Json(TaskCreatedResponse {
            message: "Task added successfully!".to_string(),
            id: id.to_string(),
        }),
    ))
}

/// `PUT /tasks/{id}` - merge the body's fields into an existing task
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::Validation(DomainError::EmptyUpdate.to_string()));
    }

    let document = parse_document(&body, TaskAction::Update)?;
    let id = parse_id(&id, TaskAction::Update)?;

    state
        .task_service
        .update_task(&id, document)
        .await
        .map_err(|e| {
            warn!(error = %e, "Task update failed");
            ApiError::from_application(TaskAction::Update, e)
        })?;

    Ok(Json(MessageResponse {
        message: "Task updated successfully!".to_string(),
    }))
}

/// `DELETE /tasks/{id}` - remove a task; unknown ids succeed
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, TaskAction::Delete)?;

    state.task_service.delete_task(&id).await.map_err(|e| {
        warn!(error = %e, "Task deletion failed");
        ApiError::from_application(TaskAction::Delete, e)
    })?;

    Ok(Json(MessageResponse {
        message: "Task deleted successfully!".to_string(),
    }))
}

/// Parse a request body into a task document. A body that is not valid
/// JSON, or valid JSON that is not an object, is a delegated-store-shaped
/// failure (500 template), not a validation 400; a JSON `null` reads as
/// an absent update body.
fn parse_document(body: &Bytes, action: TaskAction) -> Result<TaskDocument, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::store(action, format!("invalid JSON body: {e}")))?;

    match value {
        Value::Object(fields) => Ok(TaskDocument::new(fields)),
        Value::Null if action == TaskAction::Update => {
            Err(ApiError::Validation(DomainError::EmptyUpdate.to_string()))
        }
        _ => Err(ApiError::store(action, "request body is not a JSON object")),
    }
}

/// Path identifiers the store cannot address surface as store failures,
/// mirroring what delegating them would produce.
fn parse_id(raw: &str, action: TaskAction) -> Result<TaskId, ApiError> {
    TaskId::parse(raw).map_err(|e| ApiError::store(action, e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_document_accepts_objects() {
        let body = Bytes::from(r#"{"task": "buy milk"}"#);
        let document = parse_document(&body, TaskAction::Add).unwrap();
        assert_eq!(document.fields().get("task"), Some(&json!("buy milk")));
    }

    #[test]
    fn parse_document_rejects_malformed_json_as_store_failure() {
        let body = Bytes::from("not json");
        let err = parse_document(&body, TaskAction::Add).unwrap_err();
        assert!(err.to_string().starts_with("Failed to add task:"));
    }

    #[test]
    fn parse_document_rejects_non_object_as_store_failure() {
        let body = Bytes::from("[1, 2, 3]");
        let err = parse_document(&body, TaskAction::Add).unwrap_err();
        assert!(matches!(err, ApiError::Store { .. }));
    }

    #[test]
    fn parse_document_null_update_is_validation() {
        let body = Bytes::from("null");
        let err = parse_document(&body, TaskAction::Update).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "No data provided for update");
    }

    #[test]
    fn parse_id_blank_is_store_failure() {
        let err = parse_id("   ", TaskAction::Delete).unwrap_err();
        assert!(err.to_string().starts_with("Failed to delete task:"));
    }

    #[test]
    fn response_bodies_serialize_with_exact_keys() {
        let created = TaskCreatedResponse {
            message: "Task added successfully!".to_string(),
            id: "abc".to_string(),
        };
        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(
            json,
            json!({"message": "Task added successfully!", "id": "abc"})
        );

        let message = MessageResponse {
            message: "Task deleted successfully!".to_string(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json, json!({"message": "Task deleted successfully!"}));
    }
}
