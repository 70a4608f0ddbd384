//! Job/Pipeline Registry
//!
//! In-memory storage for the server. Jobs and pipelines live in two tables
//! behind a single lock, so a service operation holding the write guard can
//! check references and write them as one atomic step.
//! Each submodule holds the table operations for one entity.

pub mod job;
pub mod pipeline;

// Re-export for convenience
pub use job as job_table;
pub use pipeline as pipeline_table;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tidewatch_core::domain::pipeline::Pipeline;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use self::job::JobRecord;

/// Process-wide store shared by every request handler
#[derive(Debug, Default)]
pub struct Registry {
    tables: RwLock<Tables>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared access for queries
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Exclusive access for mutations
    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

/// The two entity tables plus the registry clock
#[derive(Debug, Default)]
pub struct Tables {
    jobs: HashMap<String, JobRecord>,
    pipelines: HashMap<String, Pipeline>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Next registry timestamp
    ///
    /// Strictly greater than every timestamp handed out before, even when the
    /// wall clock has not moved since the previous call.
    pub fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }
}

/// Generate a prefixed id not yet present in a table
fn generate_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = format!("{}_{}", prefix, Uuid::new_v4().simple());
        if !taken(&id) {
            return id;
        }
    }
}
