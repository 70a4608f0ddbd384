//! Job domain types

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParseEnumError;
use super::forecast::WaveForecastData;
use super::pipeline::Pipeline;

/// Job record as served by the API
///
/// `triggers` and `pipeline` are resolved from the registry when the job is
/// read, so they reflect the current state of the referenced entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub pipeline_id: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub args: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub wave_forecast_data: Option<WaveForecastData>,
    #[serde(default)]
    pub triggers: Vec<Job>,
    #[serde(default)]
    pub pipeline: Option<Pipeline>,
}

impl Job {
    /// Ids of the jobs this job depends on
    pub fn trigger_ids(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.id.as_str())
    }
}

/// Kind of work a job stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobType {
    FetchTerrain,
    WeatherForecast,
    TideForecast,
    WaveForecast,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FetchTerrain,
        JobType::WeatherForecast,
        JobType::TideForecast,
        JobType::WaveForecast,
    ];

    const NAMES: &'static [&'static str] =
        &["fetchTerrain", "weatherForecast", "tideForecast", "waveForecast"];

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FetchTerrain => "fetchTerrain",
            JobType::WeatherForecast => "weatherForecast",
            JobType::TideForecast => "tideForecast",
            JobType::WaveForecast => "waveForecast",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("job type", s, JobType::NAMES))
    }
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Pending,
        JobStatus::Processing,
        JobStatus::Completed,
        JobStatus::Failed,
    ];

    const NAMES: &'static [&'static str] = &["pending", "processing", "completed", "failed"];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether a job in this status may be sent back to pending
    pub fn is_retryable(&self) -> bool {
        matches!(self, JobStatus::Failed | JobStatus::Pending)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("job status", s, JobStatus::NAMES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_wire_names() {
        for job_type in JobType::ALL {
            let json = serde_json::to_string(&job_type).unwrap();
            assert_eq!(json, format!("\"{}\"", job_type.as_str()));
            assert_eq!(job_type.as_str().parse::<JobType>().unwrap(), job_type);
        }
    }

    #[test]
    fn test_job_type_rejects_unknown() {
        let err = "FetchTerrain".parse::<JobType>().unwrap_err();
        assert_eq!(err.value(), "FetchTerrain");
        assert_eq!(
            err.to_string(),
            "Invalid job type 'FetchTerrain' (expected one of: fetchTerrain, weatherForecast, tideForecast, waveForecast)"
        );
    }

    #[test]
    fn test_job_status_retryable() {
        assert!(JobStatus::Pending.is_retryable());
        assert!(JobStatus::Failed.is_retryable());
        assert!(!JobStatus::Processing.is_retryable());
        assert!(!JobStatus::Completed.is_retryable());
    }

    #[test]
    fn test_job_status_parse() {
        assert_eq!("failed".parse::<JobStatus>().unwrap(), JobStatus::Failed);
        assert!("queued".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_job_deserializes_without_optional_fields() {
        let json = serde_json::json!({
            "id": "job_1",
            "pipeline_id": "pipeline_1",
            "type": "tideForecast",
            "status": "failed",
            "error_message": "timeout",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:30:00Z"
        });

        let job: Job = serde_json::from_value(json).unwrap();
        assert_eq!(job.job_type, JobType::TideForecast);
        assert!(job.args.is_empty());
        assert!(job.triggers.is_empty());
        assert!(job.pipeline.is_none());
    }
}
