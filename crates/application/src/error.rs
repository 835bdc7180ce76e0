//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (client input failed a precondition)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Failure surfaced while talking to the document store. All store
    /// failure codes collapse into this one variant; the gateway does not
    /// distinguish not-found from permission-denied.
    #[error("Store error: {0}")]
    Store(String),
}

impl ApplicationError {
    /// The textual description interpolated into HTTP error envelopes
    pub fn message(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::Store(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::MissingTaskContent);
        assert_eq!(err.to_string(), "Task content is required");
    }

    #[test]
    fn store_error_prefixes_display_but_not_message() {
        let err = ApplicationError::Store("deadline exceeded".to_string());
        assert_eq!(err.to_string(), "Store error: deadline exceeded");
        assert_eq!(err.message(), "deadline exceeded");
    }
}
