//! Service Module
//!
//! Business logic layer for the server.
//! Services enforce the registry invariants on top of the table operations.

pub mod job;
pub mod pipeline;

// Re-export for convenience
pub use job as job_service;
pub use pipeline as pipeline_service;
