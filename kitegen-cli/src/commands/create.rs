//! Create command handler
//!
//! Provisions a repository: registers its pipeline, requires the pipeline's
//! status check on the default branch and writes the pipeline template.

use anyhow::Result;
use clap::Args;
use colored::*;
use kitegen_client::{
    BuildkiteClient, DEFAULT_BUILDKITE_API_URL, DEFAULT_GITHUB_API_URL, GithubClient,
};
use kitegen_core::types::{
    DEFAULT_BRANCH, DEFAULT_BUILD_ORG, DEFAULT_GIT_HOST, DEFAULT_SOURCE_ORG,
    DEFAULT_STATUS_CHECK_PREFIX,
};
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::provision::{ProtectionOutcome, Provisioner};

/// Arguments of `kitegen create`
#[derive(Args)]
pub struct CreateArgs {
    /// Repository name, also used as the pipeline name
    project_name: Option<String>,

    /// Buildkite API token used to create the pipeline
    #[arg(long, env = "BUILDKITE_API_TOKEN", hide_env_values = true)]
    token: String,

    /// GitHub token used to update branch protection
    #[arg(long, env = "GITHUB_API_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Buildkite organization slug
    #[arg(long, default_value = DEFAULT_BUILD_ORG)]
    org: String,

    /// GitHub organization owning the repository
    #[arg(long, default_value = DEFAULT_SOURCE_ORG)]
    github_org: String,

    /// Host used in the SSH clone URL
    #[arg(long, default_value = DEFAULT_GIT_HOST)]
    git_host: String,

    /// Default branch of the pipeline and branch to protect
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Prefix of the status check context
    #[arg(long, default_value = DEFAULT_STATUS_CHECK_PREFIX)]
    status_prefix: String,

    /// Directory in which .buildkite/template.yaml is written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Buildkite REST API base URL
    #[arg(long, default_value = DEFAULT_BUILDKITE_API_URL, hide = true)]
    buildkite_api_url: String,

    /// GitHub REST API base URL
    #[arg(long, default_value = DEFAULT_GITHUB_API_URL, hide = true)]
    github_api_url: String,
}

impl CreateArgs {
    /// Split the arguments into the project name and the configuration
    fn into_parts(self) -> (String, Config) {
        let mut config = Config::new(self.token, self.github_token);
        config.buildkite_org = self.org;
        config.github_org = self.github_org;
        config.git_host = self.git_host;
        config.default_branch = self.branch;
        config.status_check_prefix = self.status_prefix;
        config.buildkite_api_url = self.buildkite_api_url;
        config.github_api_url = self.github_api_url;
        config.output_dir = self.output_dir;

        (self.project_name.unwrap_or_default(), config)
    }
}

/// Handle `kitegen create`
///
/// On success prints a single reminder line; the template still has to be
/// committed to the repository by hand.
pub async fn handle_create_command(args: CreateArgs) -> Result<()> {
    let (project_name, config) = args.into_parts();
    config.validate()?;

    debug!("Loaded configuration: {:?}", config);

    let provisioner = Provisioner::new(
        BuildkiteClient::with_base_url(&config.buildkite_api_url, &config.buildkite_token),
        GithubClient::with_base_url(&config.github_api_url, &config.github_token),
        config.target(),
        &config.output_dir,
    );

    let report = provisioner.run(&project_name).await?;

    debug!(
        "Provisioned {} ({}), status check {}",
        report.pipeline.name, report.pipeline.id, report.status_context
    );
    match &report.protection {
        ProtectionOutcome::Extended { contexts } => {
            debug!("Required contexts now: {}", contexts.join(", "))
        }
        ProtectionOutcome::AlreadyRequired { context } => {
            debug!("{} was already required", context)
        }
    }

    println!(
        "{}",
        format!(
            "reminder: create a PR with {} to the repository!",
            report.template_path.display()
        )
        .yellow()
    );

    Ok(())
}
