//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod job;
pub mod pipeline;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::registry::Registry;

/// State shared by every handler
pub type AppState = Arc<Registry>;

/// Create the main API router with all endpoints
pub fn create_router(registry: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Job endpoints
        .route("/api/jobs", get(job::list_jobs).post(job::create_job))
        .route("/api/jobs/{id}", get(job::get_job).delete(job::delete_job))
        .route("/api/jobs/{id}/retry", post(job::retry_job))
        // Pipeline endpoints
        .route(
            "/api/pipelines",
            get(pipeline::list_pipelines).post(pipeline::create_pipeline),
        )
        .route("/api/pipelines/{id}", get(pipeline::get_pipeline))
        // Add state and middleware
        .with_state(registry)
        .layer(TraceLayer::new_for_http())
}
