//! Job Table
//!
//! Storage operations for jobs. Callers hold the registry guard for the
//! duration of a service operation; nothing here locks.

use chrono::{DateTime, Utc};
use tidewatch_core::domain::job::{Job, JobStatus};
use tidewatch_core::dto::job::JobFilter;

use super::{Tables, generate_id};

/// Stored form of a job
///
/// References are kept as ids and resolved on read, so a dependent job
/// always reports the current state of its triggers and pipeline. Embedded
/// triggers are resolved one level deep: they carry their pipeline but an
/// empty `triggers` list.
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// The job itself with `triggers` and `pipeline` left empty
    pub job: Job,
    pub trigger_ids: Vec<String>,
}

impl JobRecord {
    pub fn new(mut job: Job, trigger_ids: Vec<String>) -> Self {
        job.triggers.clear();
        job.pipeline = None;
        Self { job, trigger_ids }
    }
}

/// Fresh unused job id
pub fn next_id(tables: &Tables) -> String {
    generate_id("job", |id| tables.jobs.contains_key(id))
}

pub fn contains(tables: &Tables, id: &str) -> bool {
    tables.jobs.contains_key(id)
}

pub fn insert(tables: &mut Tables, record: JobRecord) {
    tables.jobs.insert(record.job.id.clone(), record);
}

/// Find a job by ID with its references resolved
pub fn find_by_id(tables: &Tables, id: &str) -> Option<Job> {
    tables.jobs.get(id).map(|record| resolve(tables, record))
}

/// Resolve the references of a record, whether or not it is stored yet
pub fn resolve(tables: &Tables, record: &JobRecord) -> Job {
    let mut job = with_pipeline(tables, record);
    job.triggers = record
        .trigger_ids
        .iter()
        .filter_map(|id| tables.jobs.get(id))
        .map(|trigger| with_pipeline(tables, trigger))
        .collect();
    job
}

/// Current status of a job, without resolving references
pub fn status_of(tables: &Tables, id: &str) -> Option<JobStatus> {
    tables.jobs.get(id).map(|record| record.job.status)
}

/// List jobs passing the filter, newest first
///
/// Jobs created at the same instant are ordered by id.
pub fn list(tables: &Tables, filter: &JobFilter) -> Vec<Job> {
    let mut records: Vec<&JobRecord> = tables
        .jobs
        .values()
        .filter(|record| filter.matches(&record.job))
        .collect();

    records.sort_by(|a, b| {
        b.job
            .created_at
            .cmp(&a.job.created_at)
            .then_with(|| a.job.id.cmp(&b.job.id))
    });

    records
        .into_iter()
        .map(|record| resolve(tables, record))
        .collect()
}

/// Put a job back to pending and clear its error
///
/// Returns false when the job does not exist.
pub fn mark_pending(tables: &mut Tables, id: &str, at: DateTime<Utc>) -> bool {
    match tables.jobs.get_mut(id) {
        Some(record) => {
            record.job.status = JobStatus::Pending;
            record.job.error_message = None;
            record.job.updated_at = at;
            true
        }
        None => false,
    }
}

/// Delete a job by ID
///
/// Returns false when the job does not exist.
pub fn remove(tables: &mut Tables, id: &str) -> bool {
    tables.jobs.remove(id).is_some()
}

/// Drop `trigger_id` from every job's trigger list
///
/// Returns the number of jobs that referenced it.
pub fn detach_trigger(tables: &mut Tables, trigger_id: &str) -> usize {
    let mut detached = 0;
    for record in tables.jobs.values_mut() {
        let before = record.trigger_ids.len();
        record.trigger_ids.retain(|id| id != trigger_id);
        if record.trigger_ids.len() != before {
            detached += 1;
        }
    }
    detached
}

fn with_pipeline(tables: &Tables, record: &JobRecord) -> Job {
    let mut job = record.job.clone();
    job.pipeline = tables.pipelines.get(&job.pipeline_id).cloned();
    job
}
