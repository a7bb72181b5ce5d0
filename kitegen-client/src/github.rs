//! Source host client
//!
//! Talks to the GitHub REST API for branch protection. Reads are of the full
//! protection record; writes go to the required status checks sub-resource
//! so nothing else on the branch is touched.

use async_trait::async_trait;
use kitegen_core::domain::protection::{BranchProtection, RequiredStatusChecks};
use kitegen_core::dto::protection::UpdateRequiredStatusChecks;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::fmt;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{handle_response, normalize_base_url};

/// Base URL of the public GitHub REST API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("kitegen/", env!("CARGO_PKG_VERSION"));

/// Operations the provisioning run needs from the source host
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Fetch the protection record of a branch
    ///
    /// Fails with a not-found error when the branch is not protected.
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<BranchProtection>;

    /// Replace the required status check contexts of a protected branch
    ///
    /// No precondition is sent, so the write wins over any change made since
    /// the protection was read.
    async fn update_required_status_checks(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: &UpdateRequiredStatusChecks,
    ) -> Result<RequiredStatusChecks>;
}

/// HTTP client for the GitHub REST API
#[derive(Clone)]
pub struct GithubClient {
    base_url: String,
    token: String,
    client: Client,
}

impl GithubClient {
    /// Create a client against an API base URL
    ///
    /// # Arguments
    /// * `base_url` - [`DEFAULT_GITHUB_API_URL`] or a GitHub Enterprise API root
    /// * `token` - GitHub token allowed to administer the repositories
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a client with a custom HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            token: token.into(),
            client,
        }
    }

    fn protection_url(&self, owner: &str, repo: &str, branch: &str) -> String {
        format!(
            "{}/repos/{}/{}/branches/{}/protection",
            self.base_url, owner, repo, branch
        )
    }

    /// Attach the headers every GitHub request carries
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SourceHost for GithubClient {
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<BranchProtection> {
        let url = self.protection_url(owner, repo, branch);
        debug!(%url, "fetching branch protection");

        let response = self.authorize(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!(
                "branch protection for {}/{} on {}",
                owner, repo, branch
            )));
        }

        handle_response(response).await
    }

    async fn update_required_status_checks(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: &UpdateRequiredStatusChecks,
    ) -> Result<RequiredStatusChecks> {
        let url = format!(
            "{}/required_status_checks",
            self.protection_url(owner, repo, branch)
        );
        debug!(%url, contexts = ?update.contexts, "updating required status checks");

        let response = self
            .authorize(self.client.patch(&url))
            .json(update)
            .send()
            .await?;

        handle_response(response).await
    }
}
