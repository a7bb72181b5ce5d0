//! Kitegen HTTP Clients
//!
//! Typed HTTP clients for the two services a provisioning run talks to:
//! - `BuildkiteClient`: the build service (pipeline creation, webhooks)
//! - `GithubClient`: the source host (branch protection)
//!
//! Each client implements a small trait (`BuildService`, `SourceHost`) so the
//! provisioning logic can be exercised against in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use kitegen_client::{BuildService, BuildkiteClient, DEFAULT_BUILDKITE_API_URL};
//! use kitegen_core::dto::pipeline::CreatePipeline;
//! use kitegen_core::types::{ProjectName, ProvisionTarget};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BuildkiteClient::with_base_url(DEFAULT_BUILDKITE_API_URL, "bk-token");
//!     let target = ProvisionTarget::default();
//!     let name = ProjectName::parse("my-service")?;
//!
//!     let pipeline = client
//!         .create_pipeline(&target.build_org, &CreatePipeline::for_project(&target, &name))
//!         .await?;
//!
//!     println!("Created pipeline: {}", pipeline.slug);
//!     Ok(())
//! }
//! ```

mod buildkite;
pub mod error;
mod github;

// Re-export commonly used types
pub use buildkite::{BuildService, BuildkiteClient, DEFAULT_BUILDKITE_API_URL};
pub use error::{ClientError, Result};
pub use github::{DEFAULT_GITHUB_API_URL, GithubClient, SourceHost};

use serde::de::DeserializeOwned;

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// This checks the status code and returns an appropriate error if the
/// request failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Handle an API response whose body is not needed
///
/// Only the status code is checked.
pub(crate) async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(())
}

/// Strip trailing slashes so endpoint paths can be appended with `/`
pub(crate) fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.github.com/"),
            "https://api.github.com"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8080"),
            "http://localhost:8080"
        );
    }
}
