//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the integration layer implement these ports.

mod task_store;

#[cfg(test)]
pub use task_store::MockTaskStorePort;
pub use task_store::{StoredTask, TaskStorePort};
