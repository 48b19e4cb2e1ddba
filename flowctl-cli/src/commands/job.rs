//! Job command handlers
//!
//! Handles listing, inspecting, cancelling and rescheduling jobs.

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use colored::*;
use flowctl_client::{DataIndexClient, ManagementClient};
use flowctl_core::domain::job::{Job, JobStatus};
use flowctl_core::dto::job::RescheduleRequest;
use indexmap::IndexMap;

use crate::config::Config;
use crate::id_resolver::resolve_job_id;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List jobs
    List {
        /// Filter by status (scheduled, executed, canceled, error, retry)
        #[arg(long = "status")]
        statuses: Vec<String>,
    },
    /// Get job details
    Get {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Cancel one or more jobs
    Cancel {
        /// Job IDs or unambiguous prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Reschedule a job
    Reschedule {
        /// Job ID or unambiguous prefix
        id: String,

        /// New expiration time (RFC 3339, e.g. 2026-09-01T10:00:00Z)
        #[arg(long)]
        expiration_time: String,

        /// New repeat interval in milliseconds
        #[arg(long)]
        repeat_interval: Option<i64>,

        /// New repeat limit
        #[arg(long)]
        repeat_limit: Option<i64>,
    },
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let index = DataIndexClient::new(&config.data_index_url);

    match command {
        JobCommands::List { statuses } => list_jobs(&index, &statuses).await,
        JobCommands::Get { id } => get_job(&index, &id).await,
        JobCommands::Cancel { ids } => cancel_jobs(&index, &ids).await,
        JobCommands::Reschedule {
            id,
            expiration_time,
            repeat_interval,
            repeat_limit,
        } => {
            reschedule_job(
                &index,
                &id,
                &expiration_time,
                repeat_interval,
                repeat_limit,
            )
            .await
        }
    }
}

/// List jobs
async fn list_jobs(index: &DataIndexClient, statuses: &[String]) -> Result<()> {
    let statuses = statuses
        .iter()
        .map(|s| parse_status(s))
        .collect::<Result<Vec<_>>>()?;
    let jobs = index.jobs(&statuses).await?;

    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
    } else {
        println!("{}", format!("Found {} job(s):", jobs.len()).bold());
        println!();
        for job in jobs {
            print_job_summary(&job);
        }
    }

    Ok(())
}

/// Get and display a single job
async fn get_job(index: &DataIndexClient, id: &str) -> Result<()> {
    let id = resolve_job_id(index, id).await?;
    let job = index.job(&id).await?;

    print_job_details(&job);

    Ok(())
}

/// Cancel the given jobs as one bulk run
async fn cancel_jobs(index: &DataIndexClient, ids: &[String]) -> Result<()> {
    let mut input: IndexMap<String, Job> = IndexMap::new();
    for id in ids {
        let id = resolve_job_id(index, id).await?;
        let job = index.job(&id).await?;
        input.insert(id, job);
    }

    let client = ManagementClient::new();
    let result = client.perform_bulk_cancel(input).await;

    if !result.success_items.is_empty() {
        println!(
            "{}",
            format!("{} job(s) canceled:", result.success_items.len()).green()
        );
        for job in &result.success_items {
            println!("  {} {}", "✓".green(), job.id);
        }
    }
    if !result.failed_items.is_empty() {
        println!(
            "{}",
            format!("{} job(s) failed to cancel:", result.failed_items.len()).red()
        );
        for (id, job) in &result.failed_items {
            let message = job.error_message.as_deref().unwrap_or("unknown error");
            println!("  {} {} — {}", "✗".red(), id, message.red());
        }
    }

    Ok(())
}

/// Reschedule a single job
async fn reschedule_job(
    index: &DataIndexClient,
    id: &str,
    expiration_time: &str,
    repeat_interval: Option<i64>,
    repeat_limit: Option<i64>,
) -> Result<()> {
    let id = resolve_job_id(index, id).await?;
    let job = index.job(&id).await?;

    let expiration_time = chrono::DateTime::parse_from_rfc3339(expiration_time)
        .context("Invalid expiration time, expected RFC 3339")?
        .with_timezone(&chrono::Utc);
    let req = RescheduleRequest {
        expiration_time,
        repeat_interval,
        repeat_limit,
    };

    let client = ManagementClient::new();
    match client.reschedule_job(&job, &req).await {
        Ok(updated) => {
            println!(
                "{}",
                format!("Reschedule of job {} was successful.", updated.id).green()
            );
            print_job_details(&updated);
            Ok(())
        }
        Err(error) => Err(anyhow!("Reschedule of job {} failed: {}", id, error)),
    }
}

/// Print a job summary
fn print_job_summary(job: &Job) {
    println!("  {} Job {}", "▸".cyan(), job.id.dimmed());
    println!("    Process:  {}", job.process_id);
    println!("    Instance: {}", job.process_instance_id.dimmed());
    println!("    Status:   {}", colorize_status(&job.status));
    if let Some(expiration) = job.expiration_time {
        println!(
            "    Expires:  {}",
            expiration.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!();
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.id.cyan());
    println!("  Process ID:  {}", job.process_id);
    println!("  Instance:    {}", job.process_instance_id.dimmed());
    println!("  Status:      {}", colorize_status(&job.status));
    println!("  Priority:    {}", job.priority);
    println!("  Retries:     {}", job.retries);
    println!("  Endpoint:    {}", job.endpoint);

    if let Some(expiration) = job.expiration_time {
        println!("  Expires:     {}", expiration.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(interval) = job.repeat_interval {
        println!("  Interval:    {}ms", interval);
    }
    if let Some(limit) = job.repeat_limit {
        println!("  Limit:       {}", limit);
    }
    if let Some(updated) = job.last_update {
        println!("  Updated:     {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus) -> colored::ColoredString {
    let status_str = format!("{:?}", status);
    match status {
        JobStatus::Scheduled => status_str.cyan(),
        JobStatus::Executed => status_str.green(),
        JobStatus::Canceled => status_str.dimmed(),
        JobStatus::Error => status_str.red(),
        JobStatus::Retry => status_str.yellow(),
    }
}

/// Parse a user-supplied status name
fn parse_status(input: &str) -> Result<JobStatus> {
    match input.to_lowercase().as_str() {
        "scheduled" => Ok(JobStatus::Scheduled),
        "executed" => Ok(JobStatus::Executed),
        "canceled" => Ok(JobStatus::Canceled),
        "error" => Ok(JobStatus::Error),
        "retry" => Ok(JobStatus::Retry),
        other => Err(anyhow!(
            "Unknown status '{}' (expected scheduled, executed, canceled, error or retry)",
            other
        )),
    }
}
