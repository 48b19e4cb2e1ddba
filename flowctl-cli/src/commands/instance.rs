//! Process instance command handlers
//!
//! Handles listing, inspecting and bulk-managing process instances.

use anyhow::{Result, anyhow};
use clap::Subcommand;
use colored::*;
use flowctl_client::{BulkActionResult, BulkOperation, DataIndexClient, ManagementClient};
use flowctl_core::domain::process::{ProcessInstance, ProcessInstanceState};
use indexmap::IndexMap;

use crate::config::Config;
use crate::id_resolver::resolve_instance_id;

/// Instance subcommands
#[derive(Subcommand)]
pub enum InstanceCommands {
    /// List top-level process instances
    List {
        /// Filter by state (active, completed, aborted, suspended, error)
        #[arg(long = "state")]
        states: Vec<String>,
    },
    /// Get process instance details
    Get {
        /// Instance ID or unambiguous prefix
        id: String,
    },
    /// List the child instances of a process instance
    Children {
        /// Instance ID or unambiguous prefix
        id: String,
    },
    /// Abort one or more process instances
    Abort {
        /// Instance IDs or unambiguous prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Skip the failed node of one or more process instances
    Skip {
        /// Instance IDs or unambiguous prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Re-trigger the failed node of one or more process instances
    Retry {
        /// Instance IDs or unambiguous prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Handle instance commands
///
/// Routes instance subcommands to their respective handlers.
pub async fn handle_instance_command(command: InstanceCommands, config: &Config) -> Result<()> {
    let index = DataIndexClient::new(&config.data_index_url);

    match command {
        InstanceCommands::List { states } => list_instances(&index, &states).await,
        InstanceCommands::Get { id } => get_instance(&index, &id).await,
        InstanceCommands::Children { id } => list_children(&index, &id).await,
        InstanceCommands::Abort { ids } => bulk_action(&index, &ids, BulkOperation::Abort).await,
        InstanceCommands::Skip { ids } => bulk_action(&index, &ids, BulkOperation::Skip).await,
        InstanceCommands::Retry { ids } => bulk_action(&index, &ids, BulkOperation::Retry).await,
    }
}

/// List top-level process instances
async fn list_instances(index: &DataIndexClient, states: &[String]) -> Result<()> {
    let states = states
        .iter()
        .map(|s| parse_state(s))
        .collect::<Result<Vec<_>>>()?;
    let instances = index.process_instances(&states).await?;

    if instances.is_empty() {
        println!("{}", "No process instances found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} process instance(s):", instances.len()).bold()
        );
        println!();
        for instance in instances {
            print_instance_summary(&instance);
        }
    }

    Ok(())
}

/// Get and display a single process instance
async fn get_instance(index: &DataIndexClient, id: &str) -> Result<()> {
    let id = resolve_instance_id(index, id).await?;
    let instance = index.process_instance(&id).await?;

    print_instance_details(&instance);

    Ok(())
}

/// List the children of a process instance
async fn list_children(index: &DataIndexClient, id: &str) -> Result<()> {
    let id = resolve_instance_id(index, id).await?;
    let children = index.child_instances(&id).await?;

    if children.is_empty() {
        println!(
            "{}",
            format!("No child instances found for {}.", id).yellow()
        );
    } else {
        println!(
            "{}",
            format!("Found {} child instance(s) of {}:", children.len(), id).bold()
        );
        println!();
        for child in children {
            print_instance_summary(&child);
        }
    }

    Ok(())
}

/// Run a bulk operation over the given instance ids
async fn bulk_action(index: &DataIndexClient, ids: &[String], operation: BulkOperation) -> Result<()> {
    let mut input: IndexMap<String, ProcessInstance> = IndexMap::new();
    for id in ids {
        let id = resolve_instance_id(index, id).await?;
        let instance = index.process_instance(&id).await?;
        input.insert(id, instance);
    }

    let client = ManagementClient::new();
    let result = client.perform_bulk_action(input, operation).await;

    print_bulk_result(&result, operation);

    Ok(())
}

/// Print the succeeded/failed partition of a bulk run
fn print_bulk_result(result: &BulkActionResult<ProcessInstance>, operation: BulkOperation) {
    let verb = match operation {
        BulkOperation::Abort => "aborted",
        BulkOperation::Skip => "skipped",
        BulkOperation::Retry => "retried",
    };

    if !result.success_items.is_empty() {
        println!(
            "{}",
            format!("{} instance(s) {}:", result.success_items.len(), verb).green()
        );
        for instance in &result.success_items {
            println!("  {} {}", "✓".green(), instance.id);
        }
    }

    if !result.failed_items.is_empty() {
        println!(
            "{}",
            format!("{} instance(s) failed:", result.failed_items.len()).red()
        );
        for (id, instance) in &result.failed_items {
            let message = instance.error_message.as_deref().unwrap_or("unknown error");
            println!("  {} {} — {}", "✗".red(), id, message.red());
        }
    }
}

/// Print a process instance summary
fn print_instance_summary(instance: &ProcessInstance) {
    println!("  {} Instance {}", "▸".cyan(), instance.id.dimmed());
    println!(
        "    Process:  {}",
        instance
            .process_name
            .as_deref()
            .unwrap_or(&instance.process_id)
    );
    println!("    State:    {}", colorize_state(&instance.state));
    if let Some(parent) = &instance.parent_process_instance_id {
        println!("    Parent:   {}", parent.dimmed());
    }
    println!();
}

/// Print detailed process instance information
fn print_instance_details(instance: &ProcessInstance) {
    println!("{}", "Process Instance Details:".bold());
    println!("  ID:          {}", instance.id.cyan());
    println!("  Process ID:  {}", instance.process_id);
    if let Some(name) = &instance.process_name {
        println!("  Name:        {}", name);
    }
    println!("  State:       {}", colorize_state(&instance.state));
    if let Some(parent) = &instance.parent_process_instance_id {
        println!("  Parent:      {}", parent.dimmed());
    }
    if let Some(root) = &instance.root_process_instance_id {
        println!("  Root:        {}", root.dimmed());
    }
    if let Some(service_url) = &instance.service_url {
        println!("  Service URL: {}", service_url);
    }
    if let Some(start) = instance.start {
        println!("  Started:     {}", start.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(end) = instance.end {
        println!("  Ended:       {}", end.format("%Y-%m-%d %H:%M:%S"));
    }
    if !instance.addons.is_empty() {
        println!("  Addons:      {}", instance.addons.join(", "));
    }
}

/// Colorize instance state for display
fn colorize_state(state: &ProcessInstanceState) -> colored::ColoredString {
    let state_str = format!("{:?}", state);
    match state {
        ProcessInstanceState::Active => state_str.cyan(),
        ProcessInstanceState::Completed => state_str.green(),
        ProcessInstanceState::Aborted => state_str.dimmed(),
        ProcessInstanceState::Suspended => state_str.yellow(),
        ProcessInstanceState::Error => state_str.red(),
    }
}

/// Parse a user-supplied state name
fn parse_state(input: &str) -> Result<ProcessInstanceState> {
    match input.to_lowercase().as_str() {
        "active" => Ok(ProcessInstanceState::Active),
        "completed" => Ok(ProcessInstanceState::Completed),
        "aborted" => Ok(ProcessInstanceState::Aborted),
        "suspended" => Ok(ProcessInstanceState::Suspended),
        "error" => Ok(ProcessInstanceState::Error),
        other => Err(anyhow!(
            "Unknown state '{}' (expected active, completed, aborted, suspended or error)",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_accepts_known_names() {
        assert_eq!(parse_state("active").unwrap(), ProcessInstanceState::Active);
        assert_eq!(parse_state("ERROR").unwrap(), ProcessInstanceState::Error);
        assert_eq!(
            parse_state("Suspended").unwrap(),
            ProcessInstanceState::Suspended
        );
    }

    #[test]
    fn test_parse_state_rejects_unknown_names() {
        assert!(parse_state("paused").is_err());
    }
}
