//! Pipeline domain types

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Named grouping of jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: PipelineStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Status of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    #[default]
    Active,
    Archived,
    Completed,
}

impl PipelineStatus {
    pub const ALL: [PipelineStatus; 3] = [
        PipelineStatus::Active,
        PipelineStatus::Archived,
        PipelineStatus::Completed,
    ];

    const NAMES: &'static [&'static str] = &["active", "archived", "completed"];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Active => "active",
            PipelineStatus::Archived => "archived",
            PipelineStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipelineStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("pipeline status", s, PipelineStatus::NAMES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_status_default_is_active() {
        assert_eq!(PipelineStatus::default(), PipelineStatus::Active);
    }

    #[test]
    fn test_pipeline_status_parses_wire_names() {
        for status in PipelineStatus::ALL {
            let parsed: PipelineStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("paused".parse::<PipelineStatus>().is_err());
    }
}
