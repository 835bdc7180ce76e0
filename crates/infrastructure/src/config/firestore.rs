//! Document store endpoint configuration.

use integration_firestore::FirestoreConfig;
use serde::{Deserialize, Serialize};

/// Firestore endpoint configuration
///
/// The project id comes from the credential, not from here; these settings
/// only cover the endpoint and transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreAppConfig {
    /// Firestore REST API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Database id within the project
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_database_id() -> String {
    "(default)".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for FirestoreAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database_id: default_database_id(),
            timeout_secs: default_timeout(),
        }
    }
}

impl FirestoreAppConfig {
    /// Convert to the integration crate's configuration for a project
    #[must_use]
    pub fn to_firestore_config(&self, project_id: impl Into<String>) -> FirestoreConfig {
        FirestoreConfig {
            base_url: self.base_url.clone(),
            project_id: project_id.into(),
            database_id: self.database_id.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
