//! Flowctl CLI
//!
//! Command-line interface for inspecting and managing process instances and
//! jobs through the data index and the runtime management endpoints.

mod commands;
mod config;
mod id_resolver;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "flowctl")]
#[command(about = "Process instance and job management CLI", long_about = None)]
struct Cli {
    /// Data index URL
    #[arg(
        long,
        env = "FLOWCTL_DATA_INDEX_URL",
        default_value = "http://localhost:4000"
    )]
    data_index_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        data_index_url: cli.data_index_url,
    };

    handle_command(cli.command, &config).await
}
