//! Taskgate HTTP presentation layer
//!
//! This crate provides the HTTP API for Taskgate: four task routes over
//! one collection, a health probe, and the fixed cross-origin policy
//! headers every response carries.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, TaskAction};
pub use middleware::CrossOriginPolicyLayer;
pub use routes::create_router;
pub use state::AppState;
