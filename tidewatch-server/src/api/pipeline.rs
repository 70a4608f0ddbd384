//! Pipeline API Handlers
//!
//! HTTP endpoints for pipeline management.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tidewatch_core::domain::pipeline::Pipeline;
use tidewatch_core::dto::pipeline::CreatePipeline;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::pipeline_service;

/// POST /api/pipelines
/// Create a new pipeline
pub async fn create_pipeline(
    State(registry): State<AppState>,
    payload: Result<Json<CreatePipeline>, JsonRejection>,
) -> ApiResult<Json<Pipeline>> {
    let Json(req) = payload?;

    tracing::info!("Creating pipeline: {}", req.name);

    let pipeline = pipeline_service::create_pipeline(&registry, req).await?;

    Ok(Json(pipeline))
}

/// GET /api/pipelines
/// List all pipelines
pub async fn list_pipelines(State(registry): State<AppState>) -> ApiResult<Json<Vec<Pipeline>>> {
    tracing::debug!("Listing all pipelines");

    let pipelines = pipeline_service::list_pipelines(&registry).await?;

    Ok(Json(pipelines))
}

/// GET /api/pipelines/{id}
/// Get pipeline by ID
pub async fn get_pipeline(
    State(registry): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Pipeline>> {
    tracing::debug!("Getting pipeline: {}", id);

    let pipeline = pipeline_service::get_pipeline(&registry, &id).await?;

    Ok(Json(pipeline))
}
