//! OAuth2 service-account token provider
//!
//! Firestore REST calls carry a bearer token obtained through the RFC 7523
//! JWT-bearer grant: an RS256-signed assertion posted to the credential's
//! token endpoint. Tokens are cached until shortly before expiry; the
//! refresh margin absorbs clock skew and request latency.

use std::time::{Duration, Instant};

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::{client::FirestoreError, models::TokenResponse};

const SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// The subset of a service-account credential the token grant signs with
#[derive(Clone)]
pub struct ServiceAccountKey {
    /// Service-account email, the assertion's issuer
    pub client_email: String,
    /// PEM-encoded RSA private key
    pub private_key: SecretString,
    /// Token exchange endpoint
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Caching bearer-token source for Firestore requests
pub(crate) struct TokenProvider {
    key: ServiceAccountKey,
    http: Client,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    pub(crate) fn new(key: ServiceAccountKey, http: Client) -> Self {
        Self {
            key,
            http,
            cached: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, exchanging a fresh assertion when the
    /// cached one is gone or about to expire.
    pub(crate) async fn bearer_token(&self) -> Result<String, FirestoreError> {
        if let Some(cached) = self.cached.lock().as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.token.clone());
            }
        }

        let assertion = self.sign_assertion()?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await
            .map_err(|e| FirestoreError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FirestoreError::TokenExchange(format!("HTTP {status}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| FirestoreError::TokenExchange(e.to_string()))?;

        debug!(expires_in = token.expires_in, "Exchanged service-account token");

        let lifetime = Duration::from_secs(token.expires_in);
        let expires_at = Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN);
        *self.cached.lock() = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }

    fn sign_assertion(&self) -> Result<String, FirestoreError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.expose_secret().as_bytes())
            .map_err(|e| FirestoreError::TokenExchange(format!("invalid private key: {e}")))?;

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| FirestoreError::TokenExchange(format!("signing failed: {e}")))
    }
}
