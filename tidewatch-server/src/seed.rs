//! Sample data
//!
//! Loads a demo pipeline with one job in every status so a fresh server has
//! something to show. Timestamps are backdated relative to startup.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tidewatch_core::domain::forecast::{WaveForecastData, WaveForecastEntry};
use tidewatch_core::domain::job::{Job, JobStatus, JobType};
use tidewatch_core::domain::pipeline::{Pipeline, PipelineStatus};

use crate::registry::job::JobRecord;
use crate::registry::{Registry, Tables, job_table, pipeline_table};

/// Insert the sample pipeline and its four jobs
pub async fn seed_sample_data(registry: &Registry) {
    let mut tables = registry.write().await;
    let now = tables.now();

    let pipeline_id = pipeline_table::next_id(&tables);
    pipeline_table::insert(
        &mut tables,
        Pipeline {
            id: pipeline_id.clone(),
            name: "Bay Area Forecast Pipeline".to_string(),
            description: Some(
                "Pipeline for San Francisco Bay area forecasts and terrain data".to_string(),
            ),
            status: PipelineStatus::Active,
            created_at: now,
            updated_at: now,
            metadata: HashMap::from([
                ("region".to_string(), json!("West Coast")),
                ("priority".to_string(), json!("high")),
            ]),
        },
    );

    let terrain_id = insert_job(
        &mut tables,
        SampleJob {
            pipeline_id: &pipeline_id,
            job_type: JobType::FetchTerrain,
            status: JobStatus::Pending,
            created_at: now - Duration::days(7),
            updated_at: now - Duration::days(7),
            args: json!({"location": "San Francisco Bay", "resolution": "high", "format": "GeoJSON"}),
            error_message: None,
            wave_forecast_data: None,
            trigger_ids: vec![],
        },
    );

    insert_job(
        &mut tables,
        SampleJob {
            pipeline_id: &pipeline_id,
            job_type: JobType::WeatherForecast,
            status: JobStatus::Processing,
            created_at: now - Duration::days(3) - Duration::hours(12),
            updated_at: now - Duration::hours(2),
            args: json!({"location": "San Francisco Bay", "days": 5, "include_hourly": true}),
            error_message: None,
            wave_forecast_data: None,
            trigger_ids: vec![],
        },
    );

    insert_job(
        &mut tables,
        SampleJob {
            pipeline_id: &pipeline_id,
            job_type: JobType::WaveForecast,
            status: JobStatus::Completed,
            created_at: now - Duration::days(1) - Duration::hours(6),
            updated_at: now - Duration::hours(5),
            args: json!({"location": "San Francisco Bay", "days": 2, "include_direction": true}),
            error_message: None,
            wave_forecast_data: Some(sample_wave_forecast()),
            trigger_ids: vec![terrain_id],
        },
    );

    insert_job(
        &mut tables,
        SampleJob {
            pipeline_id: &pipeline_id,
            job_type: JobType::TideForecast,
            status: JobStatus::Failed,
            created_at: now - Duration::hours(1),
            updated_at: now - Duration::minutes(30),
            args: json!({"location": "San Francisco Bay", "days": 3}),
            error_message: Some("API connection timed out after 30 seconds".to_string()),
            wave_forecast_data: None,
            trigger_ids: vec![],
        },
    );

    tracing::info!(
        "Seeded {} pipeline(s) and {} job(s)",
        tables.pipeline_count(),
        tables.job_count()
    );
}

struct SampleJob<'a> {
    pipeline_id: &'a str,
    job_type: JobType,
    status: JobStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    args: serde_json::Value,
    error_message: Option<String>,
    wave_forecast_data: Option<WaveForecastData>,
    trigger_ids: Vec<String>,
}

fn insert_job(tables: &mut Tables, sample: SampleJob<'_>) -> String {
    let id = job_table::next_id(tables);
    let args = match sample.args {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    };

    let job = Job {
        id: id.clone(),
        pipeline_id: sample.pipeline_id.to_string(),
        job_type: sample.job_type,
        status: sample.status,
        error_message: sample.error_message,
        created_at: sample.created_at,
        updated_at: sample.updated_at,
        args,
        wave_forecast_data: sample.wave_forecast_data,
        triggers: vec![],
        pipeline: None,
    };
    job_table::insert(tables, JobRecord::new(job, sample.trigger_ids));
    id
}

fn sample_wave_forecast() -> WaveForecastData {
    let entry = |time: &str, height: f64, direction: &str, period: f64| WaveForecastEntry {
        time: time.to_string(),
        height,
        direction: direction.to_string(),
        period,
    };

    WaveForecastData {
        data: vec![
            entry("2023-09-25 15:00", 1.5, "SW", 8.2),
            entry("2023-09-25 16:00", 1.7, "SW", 8.4),
            entry("2023-09-25 17:00", 1.8, "WSW", 8.5),
        ],
        location: Some("San Francisco Bay".to_string()),
        unit: Some("metric".to_string()),
    }
}
