//! Kitegen CLI
//!
//! Provisions continuous integration for a repository: registers a Buildkite
//! pipeline, requires its status check on the default branch in GitHub and
//! writes a starter pipeline template to commit.

mod commands;
mod config;
mod provision;

use clap::Parser;
use clap::error::ErrorKind;
use commands::{Commands, handle_command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kitegen", version)]
#[command(about = "Buildkite pipeline provisioning CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr; stdout only carries the final error or reminder line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kitegen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("{}", err.to_string().trim_end());
            std::process::exit(1);
        }
    };

    if let Err(err) = handle_command(cli.command).await {
        println!("{}", err);
        std::process::exit(1);
    }
}
