//! Firestore document store integration
//!
//! A client for the Firestore REST v1 API implementing the application's
//! `TaskStorePort`: paginated collection reads, create with store-assigned
//! ids, partial updates via field masks, and tolerant deletes. Requests
//! authenticate with an OAuth2 service-account token obtained through the
//! JWT-bearer grant and cached until shortly before expiry.

mod client;
mod models;
mod token;
mod value;

pub use client::{FirestoreClient, FirestoreConfig, FirestoreError};
pub use token::ServiceAccountKey;
