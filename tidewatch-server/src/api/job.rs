//! Job API Handlers
//!
//! HTTP endpoints for job creation, querying, retry and deletion.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use tidewatch_core::domain::job::Job;
use tidewatch_core::dto::job::{CreateJob, DeleteJobResponse, JobFilter, JobQuery};

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::job_service;

/// GET /api/jobs
/// List jobs, optionally filtered by type, status, pipeline and creation date
pub async fn list_jobs(
    State(registry): State<AppState>,
    query: Result<Query<JobQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Job>>> {
    let Query(query) = query?;
    let filter = JobFilter::try_from(query).map_err(job_service::JobError::from)?;

    tracing::debug!("Listing jobs with filter: {:?}", filter);

    let jobs = job_service::list_jobs(&registry, &filter).await?;

    Ok(Json(jobs))
}

/// GET /api/jobs/{id}
/// Get job details by ID
pub async fn get_job(
    State(registry): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    tracing::debug!("Getting job: {}", id);

    let job = job_service::get_job(&registry, &id).await?;

    Ok(Json(job))
}

/// POST /api/jobs
/// Create a pending job in a pipeline
pub async fn create_job(
    State(registry): State<AppState>,
    payload: Result<Json<CreateJob>, JsonRejection>,
) -> ApiResult<Json<Job>> {
    let Json(req) = payload?;

    tracing::info!(
        "Creating {} job for pipeline: {}",
        req.job_type,
        req.pipeline_id
    );

    let job = job_service::create_job(&registry, req).await?;

    Ok(Json(job))
}

/// POST /api/jobs/{id}/retry
/// Send a failed or pending job back to pending
pub async fn retry_job(
    State(registry): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    tracing::info!("Retrying job: {}", id);

    let job = job_service::retry_job(&registry, &id).await?;

    Ok(Json(job))
}

/// DELETE /api/jobs/{id}
/// Delete a job and remove it from other jobs' triggers
pub async fn delete_job(
    State(registry): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteJobResponse>> {
    tracing::info!("Deleting job: {}", id);

    let response = job_service::delete_job(&registry, &id).await?;

    Ok(Json(response))
}
