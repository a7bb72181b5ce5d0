//! Provisioning errors
//!
//! One variant per failure point of a run. Remote failures of pipeline
//! creation and protection retrieval are wrapped with a short context;
//! webhook registration and protection update failures are passed through
//! unchanged.

use kitegen_client::ClientError;
use kitegen_core::types::MissingProjectName;
use std::io;
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors that abort a provisioning run
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// No project name argument was given
    #[error(transparent)]
    MissingProjectName(#[from] MissingProjectName),

    /// A configuration value is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The build service rejected or failed the pipeline creation
    #[error("could not create pipeline: {0}")]
    CreatePipeline(#[source] ClientError),

    /// Webhook registration failed after the pipeline was created
    #[error(transparent)]
    AttachWebhook(ClientError),

    /// The branch has no protection record to extend
    #[error("could not retrieve branch protection from github: {branch} is not protected")]
    BranchNotProtected {
        branch: String,
        #[source]
        source: ClientError,
    },

    /// The branch protection record could not be read
    #[error("could not retrieve branch protection from github: {0}")]
    RetrieveProtection(#[source] ClientError),

    /// The branch is protected but requires no status checks to extend
    #[error(
        "could not retrieve branch protection from github: required status checks are not enabled on {branch}"
    )]
    StatusChecksDisabled { branch: String },

    /// Writing the extended status checks back failed
    #[error(transparent)]
    UpdateProtection(ClientError),

    #[error("could not create directory for template file: {0}")]
    CreateTemplateDir(#[source] io::Error),

    #[error(transparent)]
    SerializeTemplate(#[from] serde_yaml::Error),

    #[error(transparent)]
    WriteTemplate(io::Error),
}
