//! Pipeline command handlers
//!
//! Handles pipeline creation, listing and viewing.

use anyhow::{Result, anyhow};
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;
use tidewatch_client::TidewatchClient;
use tidewatch_core::domain::pipeline::{Pipeline, PipelineStatus};
use tidewatch_core::dto::pipeline::CreatePipeline;

use crate::config::Config;
use crate::id_resolver::resolve_pipeline_id;
use crate::types::parse_key_json;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Create a new pipeline
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,

        /// Initial status (active, archived, completed)
        #[arg(short, long, default_value = "active")]
        status: PipelineStatus,

        /// Metadata as key=value pairs; values are parsed as JSON when possible
        #[arg(short, long, value_parser = parse_key_json)]
        meta: Vec<(String, JsonValue)>,
    },
    /// List all pipelines
    List,
    /// Get pipeline details
    Get {
        /// Pipeline ID or unambiguous prefix
        id: String,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = TidewatchClient::new(&config.server_url);

    match command {
        PipelineCommands::Create {
            name,
            description,
            status,
            meta,
        } => create_pipeline(&client, name, description, status, meta).await,
        PipelineCommands::List => list_pipelines(&client).await,
        PipelineCommands::Get { id } => get_pipeline(&client, &id).await,
    }
}

async fn create_pipeline(
    client: &TidewatchClient,
    name: String,
    description: Option<String>,
    status: PipelineStatus,
    meta: Vec<(String, JsonValue)>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("Pipeline name must not be blank"));
    }

    let req = CreatePipeline {
        name,
        description,
        status,
        metadata: meta.into_iter().collect(),
    };

    let pipeline = client.create_pipeline(req).await?;

    println!("{}", "✓ Pipeline created successfully!".green().bold());
    println!("  ID:     {}", pipeline.id.cyan());
    println!("  Name:   {}", pipeline.name.bold());
    println!("  Status: {}", colorize_status(&pipeline.status));

    Ok(())
}

async fn list_pipelines(client: &TidewatchClient) -> Result<()> {
    let pipelines = client.list_pipelines().await?;

    if pipelines.is_empty() {
        println!("{}", "No pipelines found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} pipeline(s):", pipelines.len()).bold()
        );
        println!();
        for pipeline in pipelines {
            print_pipeline_summary(&pipeline);
        }
    }

    Ok(())
}

async fn get_pipeline(client: &TidewatchClient, id: &str) -> Result<()> {
    let pipeline_id = resolve_pipeline_id(client, id).await?;
    let pipeline = client.get_pipeline(&pipeline_id).await?;

    print_pipeline_details(&pipeline);

    Ok(())
}

fn print_pipeline_summary(pipeline: &Pipeline) {
    println!("  {} {}", "▸".cyan(), pipeline.name.bold());
    println!("    ID:      {}", pipeline.id.dimmed());
    println!("    Status:  {}", colorize_status(&pipeline.status));
    println!(
        "    Created: {}",
        pipeline
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(desc) = &pipeline.description {
        println!("    Description: {}", desc.dimmed());
    }
    println!();
}

fn print_pipeline_details(pipeline: &Pipeline) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:          {}", pipeline.id.cyan());
    println!("  Name:        {}", pipeline.name.bold());
    println!("  Status:      {}", colorize_status(&pipeline.status));
    if let Some(desc) = &pipeline.description {
        println!("  Description: {}", desc);
    }
    println!(
        "  Created:     {}",
        pipeline.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Updated:     {}",
        pipeline.updated_at.format("%Y-%m-%d %H:%M:%S")
    );

    if !pipeline.metadata.is_empty() {
        println!("\n{}", "Metadata:".bold());
        let mut entries: Vec<_> = pipeline.metadata.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            println!("  {} = {}", key.cyan(), value);
        }
    }
}

/// Colorize pipeline status for display
pub(crate) fn colorize_status(status: &PipelineStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        PipelineStatus::Active => status_str.green(),
        PipelineStatus::Archived => status_str.dimmed(),
        PipelineStatus::Completed => status_str.cyan(),
    }
}
