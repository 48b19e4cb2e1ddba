//! ID resolver module
//!
//! Handles resolution of id prefixes to full ids by querying the data index.
//! Instance and job ids are opaque strings, so an exact match always wins;
//! otherwise the prefix must match exactly one candidate.

use anyhow::{Context, Result, anyhow};

use flowctl_client::DataIndexClient;

/// Resolve a process instance id or prefix to a full id
///
/// # Errors
/// Returns an error if:
/// - No instance matches the prefix
/// - Multiple instances match the prefix (ambiguous)
/// - The data-index call fails
pub async fn resolve_instance_id(client: &DataIndexClient, input: &str) -> Result<String> {
    let instances = client
        .process_instances(&[])
        .await
        .context("Failed to fetch process instances for ID resolution")?;

    let ids: Vec<String> = instances.into_iter().map(|i| i.id).collect();
    resolve_from(&ids, input, "process instance")
}

/// Resolve a job id or prefix to a full id
///
/// # Errors
/// Returns an error if:
/// - No job matches the prefix
/// - Multiple jobs match the prefix (ambiguous)
/// - The data-index call fails
pub async fn resolve_job_id(client: &DataIndexClient, input: &str) -> Result<String> {
    let jobs = client
        .jobs(&[])
        .await
        .context("Failed to fetch jobs for ID resolution")?;

    let ids: Vec<String> = jobs.into_iter().map(|j| j.id).collect();
    resolve_from(&ids, input, "job")
}

/// Resolve `input` against a candidate id list: exact match first, then a
/// unique case-insensitive prefix.
fn resolve_from(candidates: &[String], input: &str, kind: &str) -> Result<String> {
    if candidates.iter().any(|id| id == input) {
        return Ok(input.to_string());
    }

    let prefix = input.to_lowercase();
    let matches: Vec<&String> = candidates
        .iter()
        .filter(|id| id.to_lowercase().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(anyhow!("No {} found with ID starting with '{}'", kind, input)),
        1 => Ok(matches[0].clone()),
        _ => {
            let ids: Vec<String> = matches.iter().map(|id| id.to_string()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple {}s: {}",
                input,
                kind,
                ids.join(", ")
            ))
        }
    }
}
