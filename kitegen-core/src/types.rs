//! Shared types
//!
//! This module contains:
//! - `ProjectName`: the single input of a provisioning run
//! - `ProvisionTarget`: the organizations and naming conventions that turn a
//!   project name into repository URLs, slugs and status check contexts
//!
//! Every remote identifier is derived here so the pipeline request and the
//! branch protection update can never disagree about which repository they
//! reference.

use std::fmt;

/// Default Buildkite organization slug
pub const DEFAULT_BUILD_ORG: &str = "bluecore-inc";

/// Default GitHub organization owning the repositories
pub const DEFAULT_SOURCE_ORG: &str = "TriggerMail";

/// Default git host used in SSH repository URLs
pub const DEFAULT_GIT_HOST: &str = "github.com";

/// Default branch that pipelines build and protection rules apply to
pub const DEFAULT_BRANCH: &str = "master";

/// Prefix Buildkite uses when it publishes commit statuses
pub const DEFAULT_STATUS_CHECK_PREFIX: &str = "buildkite";

// =============================================================================
// Project Name
// =============================================================================

/// Name of the project being provisioned
///
/// Used verbatim as the pipeline name, the repository name and the suffix of
/// the status check context. Only emptiness is rejected; character rules of
/// the remote services are left to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

/// Returned when no usable project name was supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingProjectName;

impl fmt::Display for MissingProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not find project name")
    }
}

impl std::error::Error for MissingProjectName {}

impl ProjectName {
    /// Parse a project name, rejecting empty or whitespace-only input
    ///
    /// The value is kept exactly as given.
    pub fn parse(input: &str) -> Result<Self, MissingProjectName> {
        if input.trim().is_empty() {
            return Err(MissingProjectName);
        }

        Ok(Self(input.to_string()))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ProjectName {
    type Error = MissingProjectName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ProjectName::parse(value)
    }
}

// =============================================================================
// Provision Target
// =============================================================================

/// Where a project gets provisioned
///
/// Holds the organization identifiers and conventions shared by every step
/// of a provisioning run. Built once from configuration and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionTarget {
    /// Buildkite organization slug the pipeline is created in
    pub build_org: String,

    /// GitHub organization (owner) of the repository
    pub source_org: String,

    /// Host used in the SSH clone URL
    pub git_host: String,

    /// Branch the pipeline defaults to and whose protection is extended
    pub default_branch: String,

    /// Prefix of the status check context published by the build service
    pub status_check_prefix: String,
}

impl Default for ProvisionTarget {
    fn default() -> Self {
        Self {
            build_org: DEFAULT_BUILD_ORG.to_string(),
            source_org: DEFAULT_SOURCE_ORG.to_string(),
            git_host: DEFAULT_GIT_HOST.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            status_check_prefix: DEFAULT_STATUS_CHECK_PREFIX.to_string(),
        }
    }
}

impl ProvisionTarget {
    /// SSH clone URL of the project repository (`git@<host>:<org>/<name>.git`)
    pub fn repository_url(&self, name: &ProjectName) -> String {
        format!("git@{}:{}.git", self.git_host, self.repository_slug(name))
    }

    /// Repository identifier on the source host (`<org>/<name>`)
    pub fn repository_slug(&self, name: &ProjectName) -> String {
        format!("{}/{}", self.source_org, name)
    }

    /// Status check context the new pipeline reports (`<prefix>/<name>`)
    pub fn status_context(&self, name: &ProjectName) -> String {
        format!("{}/{}", self.status_check_prefix, name)
    }

    /// Branch filter that cancels running builds everywhere but the default branch
    pub fn cancel_running_filter(&self) -> String {
        format!("!{}", self.default_branch)
    }
}
