//! Provisioning service
//!
//! Runs the three provisioning steps for a project in a fixed order:
//! 1. Register the pipeline (and its webhook) with the build service
//! 2. Extend the default branch protection with the pipeline's status check
//! 3. Write the local pipeline template
//!
//! The status check only depends on the project name, but the pipeline is
//! registered first so that the check is never required before something
//! exists to report it. The first failure aborts the run; earlier steps are
//! not rolled back.

mod error;
mod protection;
mod registrar;
mod template;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ProvisionError, Result};
pub use protection::{ProtectionOutcome, extend_branch_protection};
pub use registrar::register_pipeline;
pub use template::write_template;

use kitegen_client::{BuildService, SourceHost};
use kitegen_core::domain::pipeline::Pipeline;
use kitegen_core::types::{ProjectName, ProvisionTarget};
use std::path::PathBuf;
use tracing::info;

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub pipeline: Pipeline,
    pub status_context: String,
    pub protection: ProtectionOutcome,
    pub template_path: PathBuf,
}

/// Provisions projects against one build service and one source host
pub struct Provisioner<B, S> {
    build: B,
    source: S,
    target: ProvisionTarget,
    output_dir: PathBuf,
}

impl<B, S> Provisioner<B, S>
where
    B: BuildService,
    S: SourceHost,
{
    /// Create a provisioner
    ///
    /// # Arguments
    /// * `build` - Build service client
    /// * `source` - Source host client
    /// * `target` - Organizations and conventions for derived identifiers
    /// * `output_dir` - Directory the template directory is created in
    pub fn new(
        build: B,
        source: S,
        target: ProvisionTarget,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            build,
            source,
            target,
            output_dir: output_dir.into(),
        }
    }

    /// Provision a project
    ///
    /// An empty name fails before any remote call is made.
    pub async fn run(&self, project_name: &str) -> Result<ProvisionReport> {
        let name = ProjectName::parse(project_name)?;

        info!("Provisioning {}", name);

        let pipeline = register_pipeline(&self.build, &self.target, &name).await?;
        let protection = extend_branch_protection(&self.source, &self.target, &name).await?;
        let template_path = write_template(&self.output_dir, &name)?;

        Ok(ProvisionReport {
            status_context: self.target.status_context(&name),
            pipeline,
            protection,
            template_path,
        })
    }
}
