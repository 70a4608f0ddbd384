//! Pipeline Service
//!
//! Business logic for pipeline management.

use tidewatch_core::domain::pipeline::Pipeline;
use tidewatch_core::dto::pipeline::CreatePipeline;

use crate::registry::{Registry, pipeline_table};

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Pipeline {0} not found")]
    NotFound(String),
    #[error("{0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Create a new pipeline
pub async fn create_pipeline(registry: &Registry, req: CreatePipeline) -> Result<Pipeline> {
    validate_pipeline_request(&req)?;

    let mut tables = registry.write().await;
    let now = tables.now();

    let pipeline = Pipeline {
        id: pipeline_table::next_id(&tables),
        name: req.name,
        description: req.description,
        status: req.status,
        created_at: now,
        updated_at: now,
        metadata: req.metadata,
    };
    pipeline_table::insert(&mut tables, pipeline.clone());

    tracing::info!("Pipeline created: {} ({})", pipeline.name, pipeline.id);

    Ok(pipeline)
}

/// Get a pipeline by ID
pub async fn get_pipeline(registry: &Registry, id: &str) -> Result<Pipeline> {
    let tables = registry.read().await;
    pipeline_table::find_by_id(&tables, id).ok_or_else(|| PipelineError::NotFound(id.to_string()))
}

/// List all pipelines
pub async fn list_pipelines(registry: &Registry) -> Result<Vec<Pipeline>> {
    let tables = registry.read().await;
    Ok(pipeline_table::list_all(&tables))
}

// =============================================================================
// Validation
// =============================================================================

fn validate_pipeline_request(req: &CreatePipeline) -> Result<()> {
    if req.name.trim().is_empty() {
        return Err(PipelineError::ValidationError(
            "Pipeline name cannot be empty".to_string(),
        ));
    }

    Ok(())
}
