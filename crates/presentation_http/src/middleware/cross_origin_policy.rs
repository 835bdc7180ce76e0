//! Cross-origin policy middleware
//!
//! Adds the two fixed isolation headers to every response, success or
//! failure, on every route:
//! - `Cross-Origin-Opener-Policy: same-origin-allow-popups`
//! - `Cross-Origin-Embedder-Policy: require-corp`
//!
//! # Example
//!
//! ```ignore
//! use presentation_http::middleware::CrossOriginPolicyLayer;
//!
//! let app = Router::new()
//!     .route("/tasks", get(handler))
//!     .layer(CrossOriginPolicyLayer::new());
//! ```

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    response::Response,
};
use tower::{Layer, Service};

/// Layer that adds the cross-origin policy headers to all responses
#[derive(Clone, Debug, Default)]
pub struct CrossOriginPolicyLayer;

impl CrossOriginPolicyLayer {
    /// Create a new cross-origin policy layer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for CrossOriginPolicyLayer {
    type Service = CrossOriginPolicy<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CrossOriginPolicy { inner }
    }
}

/// Middleware service that adds the cross-origin policy headers
#[derive(Clone, Debug)]
pub struct CrossOriginPolicy<S> {
    inner: S,
}

impl<S> Service<Request> for CrossOriginPolicy<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;

            let headers = response.headers_mut();

            // Opener isolation, relaxed enough for OAuth-style popups
            headers.insert(
                HeaderName::from_static("cross-origin-opener-policy"),
                HeaderValue::from_static("same-origin-allow-popups"),
            );

            // Embedder isolation
            headers.insert(
                HeaderName::from_static("cross-origin-embedder-policy"),
                HeaderValue::from_static("require-corp"),
            );

            Ok(response)
        })
    }
}
