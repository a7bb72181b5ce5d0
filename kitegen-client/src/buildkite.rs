//! Build service client
//!
//! Talks to the Buildkite REST API: pipeline creation and webhook
//! registration for a freshly created pipeline.

use async_trait::async_trait;
use kitegen_core::domain::pipeline::Pipeline;
use kitegen_core::dto::pipeline::CreatePipeline;
use reqwest::Client;
use std::fmt;
use tracing::debug;

use crate::error::Result;
use crate::{handle_empty_response, handle_response, normalize_base_url};

/// Base URL of the public Buildkite REST API
pub const DEFAULT_BUILDKITE_API_URL: &str = "https://api.buildkite.com/v2";

/// Operations the provisioning run needs from the build service
#[async_trait]
pub trait BuildService: Send + Sync {
    /// Create a pipeline in an organization
    ///
    /// Not idempotent: the build service rejects a second pipeline with the
    /// same name.
    ///
    /// # Arguments
    /// * `org` - Organization slug
    /// * `req` - The pipeline creation request
    async fn create_pipeline(&self, org: &str, req: &CreatePipeline) -> Result<Pipeline>;

    /// Register the source host webhook for a pipeline
    ///
    /// # Arguments
    /// * `org` - Organization slug
    /// * `pipeline` - Pipeline slug
    async fn add_webhook(&self, org: &str, pipeline: &str) -> Result<()>;
}

/// HTTP client for the Buildkite REST API
#[derive(Clone)]
pub struct BuildkiteClient {
    /// Base URL of the API (e.g., "https://api.buildkite.com/v2")
    base_url: String,
    /// API access token sent as a bearer credential
    token: String,
    /// HTTP client instance
    client: Client,
}

impl BuildkiteClient {
    /// Create a client against an API base URL
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API, e.g. [`DEFAULT_BUILDKITE_API_URL`]
    /// * `token` - Buildkite API access token
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
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
}

impl fmt::Debug for BuildkiteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildkiteClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BuildService for BuildkiteClient {
    async fn create_pipeline(&self, org: &str, req: &CreatePipeline) -> Result<Pipeline> {
        let url = format!("{}/organizations/{}/pipelines", self.base_url, org);
        debug!(%url, pipeline = %req.name, "creating pipeline");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;

        handle_response(response).await
    }

    async fn add_webhook(&self, org: &str, pipeline: &str) -> Result<()> {
        let url = format!(
            "{}/organizations/{}/pipelines/{}/webhook",
            self.base_url, org, pipeline
        );
        debug!(%url, "adding pipeline webhook");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        handle_empty_response(response).await
    }
}
