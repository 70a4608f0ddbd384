//! Job DTOs

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ParseEnumError;
use crate::domain::job::{Job, JobStatus, JobType};

/// Request to create a new job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJob {
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub pipeline_id: String,
    #[serde(default)]
    pub args: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_ids: Option<Vec<String>>,
}

/// Confirmation body returned by job deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteJobResponse {
    pub message: String,
}

impl DeleteJobResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Job deleted successfully".to_string(),
        }
    }
}

/// Raw `GET /api/jobs` query string
///
/// Values stay unparsed so the server can reject bad input with its own
/// error type. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuery {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "dateFrom", default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(rename = "dateTo", default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
}

/// Parsed job listing filter
///
/// Every populated field must match (logical AND). Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub pipeline_id: Option<String>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        *self == JobFilter::default()
    }

    /// Whether a job passes every populated filter
    pub fn matches(&self, job: &Job) -> bool {
        if self.job_type.is_some_and(|t| t != job.job_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != job.status) {
            return false;
        }
        if self.date_from.is_some_and(|from| job.created_at < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| job.created_at > to) {
            return false;
        }
        if let Some(pipeline_id) = &self.pipeline_id {
            if *pipeline_id != job.pipeline_id {
                return false;
            }
        }
        true
    }
}

impl TryFrom<JobQuery> for JobFilter {
    type Error = InvalidFilter;

    fn try_from(query: JobQuery) -> Result<Self, Self::Error> {
        Ok(JobFilter {
            job_type: non_empty(query.job_type)
                .map(|t| t.parse())
                .transpose()?,
            status: non_empty(query.status).map(|s| s.parse()).transpose()?,
            date_from: non_empty(query.date_from)
                .map(|d| parse_filter_date("dateFrom", &d))
                .transpose()?,
            date_to: non_empty(query.date_to)
                .map(|d| parse_filter_date("dateTo", &d))
                .transpose()?,
            pipeline_id: non_empty(query.pipeline_id),
        })
    }
}

impl From<&JobFilter> for JobQuery {
    fn from(filter: &JobFilter) -> Self {
        JobQuery {
            job_type: filter.job_type.map(|t| t.as_str().to_string()),
            status: filter.status.map(|s| s.as_str().to_string()),
            date_from: filter.date_from.map(|d| d.to_rfc3339()),
            date_to: filter.date_to.map(|d| d.to_rfc3339()),
            pipeline_id: filter.pipeline_id.clone(),
        }
    }
}

/// Parse a filter bound
///
/// Accepts RFC 3339 timestamps (`Z` or a numeric offset) and bare
/// `YYYY-MM-DD` dates, which mean midnight UTC.
pub fn parse_filter_date(field: &str, input: &str) -> Result<DateTime<Utc>, InvalidFilter> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            InvalidFilter(format!(
                "Invalid {} '{}': expected an RFC 3339 timestamp or YYYY-MM-DD",
                field, input
            ))
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A listing query that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidFilter(pub String);

impl From<ParseEnumError> for InvalidFilter {
    fn from(err: ParseEnumError) -> Self {
        InvalidFilter(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn job(job_type: JobType, status: JobStatus, created_at: DateTime<Utc>) -> Job {
        Job {
            id: "job_test".to_string(),
            pipeline_id: "pipeline_a".to_string(),
            job_type,
            status,
            error_message: None,
            created_at,
            updated_at: created_at,
            args: HashMap::new(),
            wave_forecast_data: None,
            triggers: vec![],
            pipeline: None,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let filter = JobFilter::try_from(JobQuery::default()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&job(JobType::TideForecast, JobStatus::Failed, Utc::now())));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let query = JobQuery {
            job_type: Some("".to_string()),
            status: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(JobFilter::try_from(query).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let query = JobQuery {
            job_type: Some("surfReport".to_string()),
            ..Default::default()
        };
        let err = JobFilter::try_from(query).unwrap_err();
        assert!(err.0.contains("surfReport"));
        assert_eq!(err.to_string(), err.0);
    }

    #[test]
    fn test_parse_filter_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_filter_date("dateFrom", "2024-03-01T12:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_filter_date("dateFrom", "2024-03-01T14:00:00+02:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_filter_date("dateTo", "2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_filter_date("dateTo", "yesterday").is_err());
        assert!(parse_filter_date("dateTo", "2024-13-01").is_err());
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let filter = JobFilter {
            date_from: Some(at),
            date_to: Some(at),
            ..Default::default()
        };

        assert!(filter.matches(&job(JobType::FetchTerrain, JobStatus::Pending, at)));
        assert!(!filter.matches(&job(
            JobType::FetchTerrain,
            JobStatus::Pending,
            at + chrono::Duration::seconds(1)
        )));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = JobFilter {
            job_type: Some(JobType::WaveForecast),
            status: Some(JobStatus::Completed),
            ..Default::default()
        };
        let now = Utc::now();

        assert!(filter.matches(&job(JobType::WaveForecast, JobStatus::Completed, now)));
        assert!(!filter.matches(&job(JobType::WaveForecast, JobStatus::Failed, now)));
        assert!(!filter.matches(&job(JobType::TideForecast, JobStatus::Completed, now)));
    }

    #[test]
    fn test_filter_to_query_uses_wire_names() {
        let filter = JobFilter {
            job_type: Some(JobType::WeatherForecast),
            status: Some(JobStatus::Processing),
            ..Default::default()
        };
        let query = JobQuery::from(&filter);

        assert_eq!(query.job_type.as_deref(), Some("weatherForecast"));
        assert_eq!(query.status.as_deref(), Some("processing"));
        assert!(query.date_from.is_none());
    }
}
