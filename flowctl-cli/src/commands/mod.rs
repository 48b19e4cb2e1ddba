//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod instance;
mod job;

pub use instance::InstanceCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Process instance management
    Instance {
        #[command(subcommand)]
        command: InstanceCommands,
    },
    /// Job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Instance { command } => instance::handle_instance_command(command, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
    }
}
