//! Infrastructure layer - configuration
//!
//! Loads server settings and the Firebase service-account credential the
//! Firestore adapter authenticates with.

pub mod config;

pub use config::{AppConfig, CredentialsError, FirebaseCredentials, FirestoreAppConfig, ServerConfig};
