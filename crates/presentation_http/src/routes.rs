//! Route definitions

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, middleware::CrossOriginPolicyLayer, state::AppState};

/// Create the main router with all routes.
///
/// The cross-origin layers live here rather than in `main` so that every
/// consumer of the router (the binary and the test server alike) serves
/// the same headers on every response.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Task collection
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::add_task),
        )
        .route(
            "/tasks/{id}",
            put(handlers::tasks::update_task).delete(handlers::tasks::delete_task),
        )
        // Cross-origin requests are permitted from any origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CrossOriginPolicyLayer::new())
        // Attach state
        .with_state(state)
}
