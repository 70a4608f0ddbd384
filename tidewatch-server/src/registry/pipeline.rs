//! Pipeline Table
//!
//! Storage operations for pipelines.

use tidewatch_core::domain::pipeline::Pipeline;

use super::{Tables, generate_id};

/// Fresh unused pipeline id
pub fn next_id(tables: &Tables) -> String {
    generate_id("pipeline", |id| tables.pipelines.contains_key(id))
}

pub fn contains(tables: &Tables, id: &str) -> bool {
    tables.pipelines.contains_key(id)
}

pub fn insert(tables: &mut Tables, pipeline: Pipeline) {
    tables.pipelines.insert(pipeline.id.clone(), pipeline);
}

/// Find a pipeline by ID
pub fn find_by_id(tables: &Tables, id: &str) -> Option<Pipeline> {
    tables.pipelines.get(id).cloned()
}

/// List all pipelines in creation order
pub fn list_all(tables: &Tables) -> Vec<Pipeline> {
    let mut pipelines: Vec<Pipeline> = tables.pipelines.values().cloned().collect();
    pipelines.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    pipelines
}
