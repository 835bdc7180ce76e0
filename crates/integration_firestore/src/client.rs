//! Firestore REST client
//!
//! Implements the application's `TaskStorePort` against the Firestore v1
//! REST API for the fixed `tasks` collection.

use async_trait::async_trait;
use application::{ApplicationError, StoredTask, TaskStorePort};
use domain::{TaskDocument, TaskId};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    models::{Document, ListDocumentsResponse},
    token::{ServiceAccountKey, TokenProvider},
    value::{decode_fields, encode_fields},
};

/// The single collection this gateway serves
const TASK_COLLECTION: &str = "tasks";

/// Firestore client errors
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// HTTP client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the store failed or was rejected
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a response from the store
    #[error("Parse error: {0}")]
    ParseError(String),

    /// OAuth2 token grant failed
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Store is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Store returned a document this client cannot address
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

impl From<FirestoreError> for ApplicationError {
    fn from(err: FirestoreError) -> Self {
        Self::Store(err.to_string())
    }
}

/// Firestore endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// REST API base URL (default: <https://firestore.googleapis.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cloud project owning the database
    pub project_id: String,

    /// Database id within the project (default: `(default)`)
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Connection timeout in seconds (default: 30)
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

/// Firestore REST client implementation
#[derive(Debug)]
pub struct FirestoreClient {
    http: Client,
    config: FirestoreConfig,
    tokens: TokenProvider,
}

impl FirestoreClient {
    /// Create a new client for the configured project and database.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(
        config: FirestoreConfig,
        key: ServiceAccountKey,
    ) -> Result<Self, FirestoreError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FirestoreError::ConnectionFailed(e.to_string()))?;

        let tokens = TokenProvider::new(key, http.clone());
        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// Build the URL of the task collection
    fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.config.base_url, self.config.project_id, self.config.database_id, TASK_COLLECTION
        )
    }

    /// Build the URL of one document
    fn document_url(&self, id: &TaskId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Attach a bearer token, send, and triage the response status
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, FirestoreError> {
        let token = self.tokens.bearer_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FirestoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(FirestoreError::ServiceUnavailable(
                status_detail(response).await,
            ));
        }
        if !status.is_success() {
            return Err(FirestoreError::RequestFailed(status_detail(response).await));
        }
        Ok(response)
    }

    async fn fetch_page(
        &self,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse, FirestoreError> {
        let mut request = self.http.get(self.collection_url());
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| FirestoreError::ParseError(e.to_string()))
    }

    fn stored_task(document: &Document) -> Result<StoredTask, FirestoreError> {
        let id = document
            .id()
            .ok_or_else(|| FirestoreError::MalformedDocument(document.name.clone()))?;
        let id = TaskId::parse(id)
            .map_err(|_| FirestoreError::MalformedDocument(document.name.clone()))?;
        Ok(StoredTask {
            id,
            document: TaskDocument::new(decode_fields(&document.fields)),
        })
    }
}

#[async_trait]
impl TaskStorePort for FirestoreClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<StoredTask>, ApplicationError> {
        let mut tasks = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            for document in &page.documents {
                tasks.push(Self::stored_task(document)?);
            }
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = tasks.len(), "Listed task collection");
        Ok(tasks)
    }

    #[instrument(skip(self, document))]
    async fn add(&self, document: TaskDocument) -> Result<TaskId, ApplicationError> {
        let body = json!({"fields": encode_fields(document.fields())});
        let request = self.http.post(self.collection_url()).json(&body);

        let created: Document = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| FirestoreError::ParseError(e.to_string()))?;

        let stored = Self::stored_task(&created)?;
        debug!(id = %stored.id, "Created task document");
        Ok(stored.id)
    }

    #[instrument(skip(self, document), fields(id = %id))]
    async fn update(
        &self,
        id: &TaskId,
        document: TaskDocument,
    ) -> Result<(), ApplicationError> {
        // One mask entry per supplied field keeps the merge partial. No
        // existence precondition is sent, so an unknown id upserts rather
        // than erroring.
        let mask: Vec<(&str, &str)> = document
            .fields()
            .keys()
            .map(|name| ("updateMask.fieldPaths", name.as_str()))
            .collect();

        let body = json!({"fields": encode_fields(document.fields())});
        let request = self
            .http
            .patch(self.document_url(id))
            .query(&mask)
            .json(&body);

        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &TaskId) -> Result<(), ApplicationError> {
        let request = self.http.delete(self.document_url(id));
        self.send(request).await?;
        Ok(())
    }
}

/// Render a failed response as `HTTP <status>` plus the store's own error
/// message when the body carries one.
async fn status_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        });

    match message {
        Some(msg) => format!("HTTP {status}: {msg}"),
        None => format!("HTTP {status}"),
    }
}
