//! Job Service
//!
//! Business logic for job creation, querying, retry and deletion.

use tidewatch_core::domain::job::{Job, JobStatus};
use tidewatch_core::dto::job::{CreateJob, DeleteJobResponse, InvalidFilter, JobFilter};

use crate::registry::job::JobRecord;
use crate::registry::{Registry, job_table, pipeline_table};

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Job {0} not found")]
    NotFound(String),
    #[error("Pipeline {0} not found")]
    PipelineNotFound(String),
    #[error("Trigger job {0} not found")]
    TriggerNotFound(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    ValidationError(String),
}

impl From<InvalidFilter> for JobError {
    fn from(err: InvalidFilter) -> Self {
        JobError::ValidationError(err.0)
    }
}

pub type Result<T> = std::result::Result<T, JobError>;

/// Create a new pending job
///
/// The pipeline and every trigger are checked before anything is written.
pub async fn create_job(registry: &Registry, req: CreateJob) -> Result<Job> {
    let mut tables = registry.write().await;

    if !pipeline_table::contains(&tables, &req.pipeline_id) {
        return Err(JobError::PipelineNotFound(req.pipeline_id));
    }

    let trigger_ids = dedup_triggers(req.trigger_ids.unwrap_or_default());
    if let Some(missing) = trigger_ids
        .iter()
        .find(|id| !job_table::contains(&tables, id))
    {
        return Err(JobError::TriggerNotFound(missing.clone()));
    }

    let id = job_table::next_id(&tables);
    let now = tables.now();

    let job = Job {
        id,
        pipeline_id: req.pipeline_id,
        job_type: req.job_type,
        status: JobStatus::Pending,
        error_message: None,
        created_at: now,
        updated_at: now,
        args: req.args,
        wave_forecast_data: None,
        triggers: vec![],
        pipeline: None,
    };
    let record = JobRecord::new(job, trigger_ids);
    let job = job_table::resolve(&tables, &record);
    job_table::insert(&mut tables, record);

    tracing::info!(
        "Job created: {} ({}) for pipeline: {} with {} trigger(s)",
        job.id,
        job.job_type,
        job.pipeline_id,
        job.triggers.len()
    );

    Ok(job)
}

/// Get a job by ID
pub async fn get_job(registry: &Registry, id: &str) -> Result<Job> {
    let tables = registry.read().await;
    job_table::find_by_id(&tables, id).ok_or_else(|| JobError::NotFound(id.to_string()))
}

/// List jobs matching a filter, newest first
pub async fn list_jobs(registry: &Registry, filter: &JobFilter) -> Result<Vec<Job>> {
    let tables = registry.read().await;
    Ok(job_table::list(&tables, filter))
}

/// Send a failed or pending job back to pending
pub async fn retry_job(registry: &Registry, id: &str) -> Result<Job> {
    let mut tables = registry.write().await;

    let status =
        job_table::status_of(&tables, id).ok_or_else(|| JobError::NotFound(id.to_string()))?;

    if !status.is_retryable() {
        tracing::warn!("Rejected retry of job {} in state {}", id, status);
        return Err(JobError::InvalidState(format!(
            "Only failed or pending jobs can be retried (job {} is {})",
            id, status
        )));
    }

    let now = tables.now();
    if !job_table::mark_pending(&mut tables, id, now) {
        return Err(JobError::NotFound(id.to_string()));
    }

    tracing::info!("Job {} retried (was {})", id, status);

    job_table::find_by_id(&tables, id).ok_or_else(|| JobError::NotFound(id.to_string()))
}

/// Delete a job and detach it from every dependent job
pub async fn delete_job(registry: &Registry, id: &str) -> Result<DeleteJobResponse> {
    let mut tables = registry.write().await;

    if !job_table::remove(&mut tables, id) {
        return Err(JobError::NotFound(id.to_string()));
    }

    let detached = job_table::detach_trigger(&mut tables, id);

    tracing::info!("Job deleted: {} (detached from {} dependent job(s))", id, detached);

    Ok(DeleteJobResponse::deleted())
}

// =============================================================================
// Validation
// =============================================================================

fn dedup_triggers(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::pipeline_service;
    use std::collections::HashMap;
    use tidewatch_core::domain::job::JobType;
    use tidewatch_core::dto::pipeline::CreatePipeline;

    async fn registry_with_pipeline() -> (Registry, String) {
        let registry = Registry::new();
        let pipeline = pipeline_service::create_pipeline(
            &registry,
            CreatePipeline {
                name: "Bay Area".to_string(),
                description: None,
                status: Default::default(),
                metadata: HashMap::new(),
            },
        )
        .await
        .unwrap();
        (registry, pipeline.id)
    }

    fn create_req(pipeline_id: &str, job_type: JobType, triggers: &[&str]) -> CreateJob {
        CreateJob {
            job_type,
            pipeline_id: pipeline_id.to_string(),
            args: HashMap::from([("location".to_string(), serde_json::json!("Ocean Beach"))]),
            trigger_ids: if triggers.is_empty() {
                None
            } else {
                Some(triggers.iter().map(|t| t.to_string()).collect())
            },
        }
    }

    async fn set_status(registry: &Registry, id: &str, status: JobStatus, error: Option<&str>) {
        let mut tables = registry.write().await;
        let mut job = job_table::find_by_id(&tables, id).unwrap();
        let trigger_ids = job.trigger_ids().map(str::to_string).collect();
        job.status = status;
        job.error_message = error.map(str::to_string);
        job_table::insert(&mut tables, JobRecord::new(job, trigger_ids));
    }

    #[tokio::test]
    async fn test_create_job_starts_pending() {
        let (registry, pipeline_id) = registry_with_pipeline().await;

        let job = create_job(&registry, create_req(&pipeline_id, JobType::FetchTerrain, &[]))
            .await
            .unwrap();

        assert!(job.id.starts_with("job_"));
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.created_at, job.updated_at);
        assert!(job.error_message.is_none());
        assert_eq!(job.pipeline.as_ref().map(|p| p.id.as_str()), Some(pipeline_id.as_str()));
        assert_eq!(job.args["location"], "Ocean Beach");
        assert_eq!(get_job(&registry, &job.id).await.unwrap(), job);
    }

    #[tokio::test]
    async fn test_create_job_unknown_pipeline_leaves_table_unchanged() {
        let (registry, _) = registry_with_pipeline().await;

        let result = create_job(&registry, create_req("pipeline_nope", JobType::TideForecast, &[])).await;

        assert!(matches!(result, Err(JobError::PipelineNotFound(id)) if id == "pipeline_nope"));
        assert_eq!(registry.read().await.job_count(), 0);
    }

    #[tokio::test]
    async fn test_create_job_unknown_trigger_is_all_or_nothing() {
        let (registry, pipeline_id) = registry_with_pipeline().await;
        let existing = create_job(&registry, create_req(&pipeline_id, JobType::FetchTerrain, &[]))
            .await
            .unwrap();

        let result = create_job(
            &registry,
            create_req(&pipeline_id, JobType::WaveForecast, &[&existing.id, "job_ghost"]),
        )
        .await;

        assert!(matches!(result, Err(JobError::TriggerNotFound(id)) if id == "job_ghost"));
        assert_eq!(registry.read().await.job_count(), 1);
    }

    #[tokio::test]
    async fn test_create_job_dedups_triggers() {
        let (registry, pipeline_id) = registry_with_pipeline().await;
        let first = create_job(&registry, create_req(&pipeline_id, JobType::FetchTerrain, &[]))
            .await
            .unwrap();

        let job = create_job(
            &registry,
            create_req(&pipeline_id, JobType::WaveForecast, &[&first.id, &first.id]),
        )
        .await
        .unwrap();

        assert_eq!(job.triggers.len(), 1);
        assert_eq!(job.triggers[0].id, first.id);
    }

    #[tokio::test]
    async fn test_get_job_not_found() {
        let registry = Registry::new();
        let result = get_job(&registry, "job_missing").await;
        assert!(matches!(result, Err(JobError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_retry_failed_job() {
        let (registry, pipeline_id) = registry_with_pipeline().await;
        let job = create_job(&registry, create_req(&pipeline_id, JobType::TideForecast, &[]))
            .await
            .unwrap();
        set_status(&registry, &job.id, JobStatus::Failed, Some("API connection timed out")).await;

        let retried = retry_job(&registry, &job.id).await.unwrap();

        assert_eq!(retried.status, JobStatus::Pending);
        assert!(retried.error_message.is_none());
        assert!(retried.updated_at > job.updated_at);
        assert_eq!(retried.created_at, job.created_at);
    }

    #[tokio::test]
    async fn test_retry_pending_job_advances_updated_at() {
        let (registry, pipeline_id) = registry_with_pipeline().await;
        let job = create_job(&registry, create_req(&pipeline_id, JobType::FetchTerrain, &[]))
            .await
            .unwrap();

        let first = retry_job(&registry, &job.id).await.unwrap();
        let second = retry_job(&registry, &job.id).await.unwrap();

        assert_eq!(second.status, JobStatus::Pending);
        assert!(first.updated_at > job.updated_at);
        assert!(second.updated_at > first.updated_at);
    }

    #[tokio::test]
    async fn test_retry_rejects_processing_and_completed() {
        let (registry, pipeline_id) = registry_with_pipeline().await;

        for status in [JobStatus::Processing, JobStatus::Completed] {
            let job = create_job(&registry, create_req(&pipeline_id, JobType::WeatherForecast, &[]))
                .await
                .unwrap();
            set_status(&registry, &job.id, status, None).await;
            let before = get_job(&registry, &job.id).await.unwrap();

            let result = retry_job(&registry, &job.id).await;

            assert!(matches!(result, Err(JobError::InvalidState(_))));
            assert_eq!(get_job(&registry, &job.id).await.unwrap(), before);
        }
    }

    #[tokio::test]
    async fn test_retry_missing_job() {
        let registry = Registry::new();
        assert!(matches!(
            retry_job(&registry, "job_missing").await,
            Err(JobError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_job_detaches_from_dependents() {
        let (registry, pipeline_id) = registry_with_pipeline().await;
        let terrain = create_job(&registry, create_req(&pipeline_id, JobType::FetchTerrain, &[]))
            .await
            .unwrap();
        let weather = create_job(&registry, create_req(&pipeline_id, JobType::WeatherForecast, &[]))
            .await
            .unwrap();
        let wave = create_job(
            &registry,
            create_req(&pipeline_id, JobType::WaveForecast, &[&terrain.id, &weather.id]),
        )
        .await
        .unwrap();

        let response = delete_job(&registry, &terrain.id).await.unwrap();
        assert_eq!(response, DeleteJobResponse::deleted());

        let wave = get_job(&registry, &wave.id).await.unwrap();
        let remaining: Vec<&str> = wave.trigger_ids().collect();
        assert_eq!(remaining, vec![weather.id.as_str()]);

        let all = list_jobs(&registry, &JobFilter::default()).await.unwrap();
        assert!(all.iter().all(|j| j.id != terrain.id));
        assert!(all.iter().all(|j| j.trigger_ids().all(|t| t != terrain.id)));
    }

    #[tokio::test]
    async fn test_delete_missing_job() {
        let registry = Registry::new();
        assert!(matches!(
            delete_job(&registry, "job_missing").await,
            Err(JobError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_jobs_filters_by_type_and_status() {
        let (registry, pipeline_id) = registry_with_pipeline().await;
        let terrain = create_job(&registry, create_req(&pipeline_id, JobType::FetchTerrain, &[]))
            .await
            .unwrap();
        let tide = create_job(&registry, create_req(&pipeline_id, JobType::TideForecast, &[]))
            .await
            .unwrap();
        set_status(&registry, &tide.id, JobStatus::Failed, Some("boom")).await;

        let by_type = list_jobs(
            &registry,
            &JobFilter {
                job_type: Some(JobType::FetchTerrain),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].id, terrain.id);

        let failed = list_jobs(
            &registry,
            &JobFilter {
                status: Some(JobStatus::Failed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].id, tide.id);
    }

    #[tokio::test]
    async fn test_list_jobs_date_range_is_inclusive() {
        let (registry, pipeline_id) = registry_with_pipeline().await;
        let mut created = Vec::new();
        for _ in 0..3 {
            created.push(
                create_job(&registry, create_req(&pipeline_id, JobType::FetchTerrain, &[]))
                    .await
                    .unwrap(),
            );
        }

        let jobs = list_jobs(
            &registry,
            &JobFilter {
                date_from: Some(created[1].created_at),
                date_to: Some(created[2].created_at),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec![created[2].id.as_str(), created[1].id.as_str()]);
    }

    #[test]
    fn test_invalid_filter_maps_to_validation_error() {
        let err: JobError = InvalidFilter("Invalid dateFrom 'soon'".to_string()).into();
        assert!(matches!(err, JobError::ValidationError(msg) if msg.contains("soon")));
    }
}
