//! Firestore REST wire structures

use serde::Deserialize;
use serde_json::{Map, Value};

/// A document as returned by the REST API. `name` is the full resource
/// path; `fields` are typed values decoded elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// The document id: the final segment of the resource name
    pub(crate) fn id(&self) -> Option<&str> {
        self.name.rsplit('/').next().filter(|s| !s.is_empty())
    }
}

/// Response to listing a collection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Response from the OAuth2 token endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expiry")]
    pub expires_in: u64,
}

const fn default_expiry() -> u64 {
    3600
}
