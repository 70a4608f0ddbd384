//! Job command handlers
//!
//! Handles listing (with filters), viewing, creating, retrying and deleting
//! jobs.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;
use tidewatch_client::TidewatchClient;
use tidewatch_core::domain::forecast::WaveForecastData;
use tidewatch_core::domain::job::{Job, JobStatus, JobType};
use tidewatch_core::dto::job::{CreateJob, InvalidFilter, JobFilter, parse_filter_date};

use crate::config::Config;
use crate::id_resolver::{resolve_job_id, resolve_pipeline_id};
use crate::types::parse_key_json;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List jobs, newest first
    List {
        /// Only jobs of this type (fetchTerrain, weatherForecast, tideForecast, waveForecast)
        #[arg(short = 't', long = "type")]
        job_type: Option<JobType>,

        /// Only jobs in this status (pending, processing, completed, failed)
        #[arg(short, long)]
        status: Option<JobStatus>,

        /// Created at or after (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_from)]
        from: Option<DateTime<Utc>>,

        /// Created at or before (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_to)]
        to: Option<DateTime<Utc>>,

        /// Only jobs of this pipeline (ID or unambiguous prefix)
        #[arg(short, long)]
        pipeline: Option<String>,
    },
    /// Get job details
    Get {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Create a new job
    Create {
        /// Job type
        #[arg(short = 't', long = "type")]
        job_type: JobType,

        /// Owning pipeline (ID or unambiguous prefix)
        #[arg(short, long)]
        pipeline: String,

        /// Arguments as key=value pairs; values are parsed as JSON when possible
        #[arg(short, long, value_parser = parse_key_json)]
        arg: Vec<(String, JsonValue)>,

        /// Job this one depends on (ID or unambiguous prefix); repeatable
        #[arg(long)]
        trigger: Vec<String>,
    },
    /// Send a failed or pending job back to pending
    Retry {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Delete a job
    Delete {
        /// Job ID or unambiguous prefix
        id: String,
    },
}

fn parse_from(s: &str) -> Result<DateTime<Utc>, InvalidFilter> {
    parse_filter_date("--from", s)
}

fn parse_to(s: &str) -> Result<DateTime<Utc>, InvalidFilter> {
    parse_filter_date("--to", s)
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = TidewatchClient::new(&config.server_url);

    match command {
        JobCommands::List {
            job_type,
            status,
            from,
            to,
            pipeline,
        } => {
            let pipeline_id = match pipeline {
                Some(p) => Some(resolve_pipeline_id(&client, &p).await?),
                None => None,
            };
            let filter = JobFilter {
                job_type,
                status,
                date_from: from,
                date_to: to,
                pipeline_id,
            };
            list_jobs(&client, &filter).await
        }
        JobCommands::Get { id } => get_job(&client, &id).await,
        JobCommands::Create {
            job_type,
            pipeline,
            arg,
            trigger,
        } => create_job(&client, job_type, &pipeline, arg, trigger).await,
        JobCommands::Retry { id } => retry_job(&client, &id).await,
        JobCommands::Delete { id } => delete_job(&client, &id).await,
    }
}

async fn list_jobs(client: &TidewatchClient, filter: &JobFilter) -> Result<()> {
    let jobs = client.list_jobs(filter).await?;

    if jobs.is_empty() {
        let message = if filter.is_empty() {
            "No jobs found."
        } else {
            "No jobs match the given filters."
        };
        println!("{}", message.yellow());
    } else {
        println!("{}", format!("Found {} job(s):", jobs.len()).bold());
        println!();
        for job in jobs {
            print_job_summary(&job);
        }
    }

    Ok(())
}

async fn get_job(client: &TidewatchClient, id: &str) -> Result<()> {
    let job_id = resolve_job_id(client, id).await?;
    let job = client.get_job(&job_id).await?;

    print_job_details(&job);

    Ok(())
}

async fn create_job(
    client: &TidewatchClient,
    job_type: JobType,
    pipeline: &str,
    args: Vec<(String, JsonValue)>,
    triggers: Vec<String>,
) -> Result<()> {
    let pipeline_id = resolve_pipeline_id(client, pipeline).await?;

    let mut trigger_ids = Vec::with_capacity(triggers.len());
    for trigger in &triggers {
        trigger_ids.push(resolve_job_id(client, trigger).await?);
    }

    let req = CreateJob {
        job_type,
        pipeline_id,
        args: args.into_iter().collect(),
        trigger_ids: (!trigger_ids.is_empty()).then_some(trigger_ids),
    };

    let job = client.create_job(req).await?;

    println!("{}", "✓ Job created successfully!".green().bold());
    println!("  Job ID:      {}", job.id.cyan());
    println!("  Type:        {}", job.job_type);
    println!("  Pipeline ID: {}", job.pipeline_id.dimmed());
    println!("  Status:      {}", colorize_status(&job.status));
    if !job.triggers.is_empty() {
        println!(
            "  Triggers:    {}",
            job.trigger_ids().collect::<Vec<_>>().join(", ").dimmed()
        );
    }

    Ok(())
}

async fn retry_job(client: &TidewatchClient, id: &str) -> Result<()> {
    let job_id = resolve_job_id(client, id).await?;
    let job = client.retry_job(&job_id).await?;

    println!(
        "{}",
        format!("✓ Job {} queued for retry", job.id).green().bold()
    );
    println!("  Status:  {}", colorize_status(&job.status));
    println!("  Updated: {}", job.updated_at.format("%Y-%m-%d %H:%M:%S"));

    Ok(())
}

async fn delete_job(client: &TidewatchClient, id: &str) -> Result<()> {
    let job_id = resolve_job_id(client, id).await?;
    let response = client.delete_job(&job_id).await?;

    println!("{}", format!("✓ {} ({})", response.message, job_id).green().bold());

    Ok(())
}

/// Print a job summary
fn print_job_summary(job: &Job) {
    println!("  {} {} {}", "▸".cyan(), job.job_type.to_string().bold(), job.id.dimmed());
    println!("    Status:   {}", colorize_status(&job.status));
    match &job.pipeline {
        Some(pipeline) => println!("    Pipeline: {}", pipeline.name.dimmed()),
        None => println!("    Pipeline: {}", job.pipeline_id.dimmed()),
    }
    println!(
        "    Created:  {}",
        job.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(error) = &job.error_message {
        println!("    Error:    {}", error.red());
    }
    println!();
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.id.cyan());
    println!("  Type:        {}", job.job_type.to_string().bold());
    println!("  Status:      {}", colorize_status(&job.status));
    println!("  Pipeline ID: {}", job.pipeline_id.dimmed());
    if let Some(pipeline) = &job.pipeline {
        println!(
            "  Pipeline:    {} ({})",
            pipeline.name,
            super::pipeline::colorize_status(&pipeline.status)
        );
    }
    println!("  Created:     {}", job.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Updated:     {}", job.updated_at.format("%Y-%m-%d %H:%M:%S"));

    if let Some(error) = &job.error_message {
        println!("\n{}", "Error:".bold());
        println!("  {}", error.red());
    }

    if !job.args.is_empty() {
        println!("\n{}", "Arguments:".bold());
        let mut entries: Vec<_> = job.args.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            println!("  {} = {}", key.cyan(), value);
        }
    }

    if !job.triggers.is_empty() {
        println!("\n{}", "Triggered by:".bold());
        for trigger in &job.triggers {
            println!(
                "  {} {} {} ({})",
                "▸".cyan(),
                trigger.job_type,
                trigger.id.dimmed(),
                colorize_status(&trigger.status)
            );
        }
    }

    if let Some(forecast) = &job.wave_forecast_data {
        print_wave_forecast(forecast);
    }
}

fn print_wave_forecast(forecast: &WaveForecastData) {
    println!("\n{}", "Wave Forecast:".bold());
    if let Some(location) = &forecast.location {
        println!("  Location: {}", location);
    }
    let unit = forecast.unit.as_deref().unwrap_or("m");

    println!(
        "  {:<22} {:>8} {:>10} {:>8}",
        "Time".bold(),
        "Height".bold(),
        "Direction".bold(),
        "Period".bold()
    );
    println!("  {}", "─".repeat(51).dimmed());
    for entry in &forecast.data {
        println!(
            "  {:<22} {:>8} {:>10} {:>8}",
            entry.time,
            format!("{:.1} {}", entry.height, unit),
            entry.direction,
            format!("{:.0} s", entry.period)
        );
    }
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Processing => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Failed => status_str.red(),
    }
}
