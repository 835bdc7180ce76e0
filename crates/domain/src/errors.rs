//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Create payload lacks a usable `task` field
    #[error("Task content is required")]
    MissingTaskContent,

    /// Update payload carries no fields
    #[error("No data provided for update")]
    EmptyUpdate,

    /// Document identifier is not usable
    #[error("Invalid task id: {0}")]
    InvalidTaskId(String),
}
