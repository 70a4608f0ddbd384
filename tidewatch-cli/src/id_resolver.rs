//! ID resolver module
//!
//! Resolves id prefixes to full ids by listing resources from the server,
//! so users can type `job get 3fa` instead of the whole id.

use anyhow::{Context, Result, anyhow};
use tidewatch_client::TidewatchClient;
use tidewatch_core::dto::job::JobFilter;

use crate::types::IdOrPrefix;

pub const JOB_PREFIX: &str = "job_";
pub const PIPELINE_PREFIX: &str = "pipeline_";

/// Resolve a pipeline id or prefix to a full id
///
/// # Errors
/// Returns an error if:
/// - No pipeline matches the prefix
/// - Multiple pipelines match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_pipeline_id(client: &TidewatchClient, input: &str) -> Result<String> {
    let id_or_prefix = IdOrPrefix::parse(input, PIPELINE_PREFIX);
    if let Some(id) = id_or_prefix.as_full() {
        return Ok(id.to_string());
    }

    let pipelines = client
        .list_pipelines()
        .await
        .context("Failed to fetch pipelines for ID resolution")?;

    pick_unique(
        "pipeline",
        &id_or_prefix,
        pipelines.into_iter().map(|p| p.id),
    )
}

/// Resolve a job id or prefix to a full id
///
/// # Errors
/// Returns an error if:
/// - No job matches the prefix
/// - Multiple jobs match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_job_id(client: &TidewatchClient, input: &str) -> Result<String> {
    let id_or_prefix = IdOrPrefix::parse(input, JOB_PREFIX);
    if let Some(id) = id_or_prefix.as_full() {
        return Ok(id.to_string());
    }

    let jobs = client
        .list_jobs(&JobFilter::default())
        .await
        .context("Failed to fetch jobs for ID resolution")?;

    pick_unique("job", &id_or_prefix, jobs.into_iter().map(|j| j.id))
}

fn pick_unique(
    kind: &str,
    id_or_prefix: &IdOrPrefix,
    ids: impl Iterator<Item = String>,
) -> Result<String> {
    let prefix = id_or_prefix.as_str();
    let mut matches: Vec<String> = ids.filter(|id| id.starts_with(prefix)).collect();

    match matches.len() {
        0 => Err(anyhow!("No {} found with ID starting with '{}'", kind, prefix)),
        1 => Ok(matches.remove(0)),
        _ => Err(anyhow!(
            "Ambiguous prefix '{}' matches multiple {}s: {}",
            prefix,
            kind,
            matches.join(", ")
        )),
    }
}
