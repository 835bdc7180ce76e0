//! API error handling
//!
//! Two kinds of failure leave this API: validation rejections (HTTP 400,
//! fixed message per route, no internal detail) and store failures
//! (HTTP 500, the underlying description interpolated into a
//! route-specific template). Nothing else escapes a handler.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// The task operation a failure happened in; selects the 500 template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Listing the collection
    Fetch,
    /// Creating a task
    Add,
    /// Updating a task
    Update,
    /// Deleting a task
    Delete,
}

impl TaskAction {
    /// The route's failure template prefix
    const fn failure_prefix(self) -> &'static str {
        match self {
            Self::Fetch => "Failed to fetch tasks",
            Self::Add => "Failed to add task",
            Self::Update => "Failed to update task",
            Self::Delete => "Failed to delete task",
        }
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client input failed a precondition
    #[error("{0}")]
    Validation(String),

    /// A failure surfaced while performing a store operation
    #[error("{}: {message}", .action.failure_prefix())]
    Store {
        /// Operation the failure belongs to
        action: TaskAction,
        /// Underlying error description
        message: String,
    },
}

impl ApiError {
    /// Wrap a failure description in the route's 500 template
    pub fn store(action: TaskAction, message: impl Into<String>) -> Self {
        Self::Store {
            action,
            message: message.into(),
        }
    }

    /// Map an application error for the given route: domain errors are
    /// client validation failures, everything else wears the store
    /// template.
    pub fn from_application(action: TaskAction, err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::Validation(e.to_string()),
            ApplicationError::Store(message) => Self::Store { action, message },
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn validation_renders_message_verbatim() {
        let err = ApiError::Validation("Task content is required".to_string());
        assert_eq!(err.to_string(), "Task content is required");
    }

    #[test]
    fn store_templates_per_action() {
        let err = ApiError::store(TaskAction::Fetch, "HTTP 503");
        assert_eq!(err.to_string(), "Failed to fetch tasks: HTTP 503");

        let err = ApiError::store(TaskAction::Add, "HTTP 503");
        assert_eq!(err.to_string(), "Failed to add task: HTTP 503");

        let err = ApiError::store(TaskAction::Update, "HTTP 503");
        assert_eq!(err.to_string(), "Failed to update task: HTTP 503");

        let err = ApiError::store(TaskAction::Delete, "HTTP 503");
        assert_eq!(err.to_string(), "Failed to delete task: HTTP 503");
    }

    #[test]
    fn domain_errors_map_to_validation() {
        let err = ApiError::from_application(
            TaskAction::Add,
            ApplicationError::Domain(DomainError::MissingTaskContent),
        );
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Task content is required");
    }

    #[test]
    fn store_errors_map_to_store_template() {
        let err = ApiError::from_application(
            TaskAction::Update,
            ApplicationError::Store("deadline exceeded".to_string()),
        );
        assert_eq!(err.to_string(), "Failed to update task: deadline exceeded");
    }

    #[test]
    fn into_response_validation_is_400() {
        let response = ApiError::Validation("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn into_response_store_is_500() {
        let response = ApiError::store(TaskAction::Delete, "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_serialization() {
        let body = ErrorResponse {
            error: "Failed to fetch tasks: boom".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Failed to fetch tasks: boom"}"#);
    }
}
