//! Pipeline DTOs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::PipelineStatus;

/// Request to create a new pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePipeline {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: PipelineStatus,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}
