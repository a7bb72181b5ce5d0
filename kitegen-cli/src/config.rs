//! Configuration module
//!
//! Handles CLI configuration: credentials, API endpoints, the organizations
//! projects are provisioned into and the output directory for the template.

use kitegen_client::{DEFAULT_BUILDKITE_API_URL, DEFAULT_GITHUB_API_URL};
use kitegen_core::types::{
    DEFAULT_BRANCH, DEFAULT_BUILD_ORG, DEFAULT_GIT_HOST, DEFAULT_SOURCE_ORG,
    DEFAULT_STATUS_CHECK_PREFIX, ProvisionTarget,
};
use std::fmt;
use std::path::PathBuf;

use crate::provision::ProvisionError;

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// Buildkite API access token
    pub buildkite_token: String,

    /// GitHub token with admin rights on the repositories
    pub github_token: String,

    /// Buildkite organization slug
    pub buildkite_org: String,

    /// GitHub organization owning the repositories
    pub github_org: String,

    /// Host used in SSH clone URLs
    pub git_host: String,

    /// Branch built by default and whose protection is extended
    pub default_branch: String,

    /// Prefix of the status check context Buildkite publishes
    pub status_check_prefix: String,

    /// Buildkite REST API base URL
    pub buildkite_api_url: String,

    /// GitHub REST API base URL
    pub github_api_url: String,

    /// Directory the `.buildkite` template directory is created in
    pub output_dir: PathBuf,
}

impl Config {
    /// Creates a configuration with defaults for everything but the tokens
    pub fn new(buildkite_token: String, github_token: String) -> Self {
        Self {
            buildkite_token,
            github_token,
            buildkite_org: DEFAULT_BUILD_ORG.to_string(),
            github_org: DEFAULT_SOURCE_ORG.to_string(),
            git_host: DEFAULT_GIT_HOST.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            status_check_prefix: DEFAULT_STATUS_CHECK_PREFIX.to_string(),
            buildkite_api_url: DEFAULT_BUILDKITE_API_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            output_dir: PathBuf::from("."),
        }
    }

    /// Validates the configuration
    ///
    /// Tokens are only checked for presence.
    pub fn validate(&self) -> Result<(), ProvisionError> {
        let required = [
            ("token", &self.buildkite_token),
            ("github-token", &self.github_token),
            ("org", &self.buildkite_org),
            ("github-org", &self.github_org),
            ("git-host", &self.git_host),
            ("branch", &self.default_branch),
            ("status-prefix", &self.status_check_prefix),
        ];

        for (flag, value) in required {
            if value.trim().is_empty() {
                return Err(ProvisionError::InvalidConfig(format!(
                    "--{} cannot be empty",
                    flag
                )));
            }
        }

        for (flag, url) in [
            ("buildkite-api-url", &self.buildkite_api_url),
            ("github-api-url", &self.github_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ProvisionError::InvalidConfig(format!(
                    "--{} must start with http:// or https://",
                    flag
                )));
            }
        }

        Ok(())
    }

    /// Provisioning target derived from this configuration
    pub fn target(&self) -> ProvisionTarget {
        ProvisionTarget {
            build_org: self.buildkite_org.clone(),
            source_org: self.github_org.clone(),
            git_host: self.git_host.clone(),
            default_branch: self.default_branch.clone(),
            status_check_prefix: self.status_check_prefix.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("buildkite_org", &self.buildkite_org)
            .field("github_org", &self.github_org)
            .field("git_host", &self.git_host)
            .field("default_branch", &self.default_branch)
            .field("status_check_prefix", &self.status_check_prefix)
            .field("buildkite_api_url", &self.buildkite_api_url)
            .field("github_api_url", &self.github_api_url)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}
