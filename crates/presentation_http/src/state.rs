//! Application state shared across handlers

use std::sync::Arc;

use application::TaskService;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Task service backed by the document store
    pub task_service: Arc<TaskService>,
}

impl AppState {
    /// Create state around a task service
    #[must_use]
    pub fn new(task_service: Arc<TaskService>) -> Self {
        Self { task_service }
    }
}
