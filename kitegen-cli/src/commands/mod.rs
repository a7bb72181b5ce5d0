//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod create;

pub use create::CreateArgs;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create the Buildkite pipeline, branch protection and template for a repository
    Create(CreateArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Create(args) => create::handle_create_command(args).await,
    }
}
