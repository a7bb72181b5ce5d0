//! Branch protection extension
//!
//! Adds the new pipeline's status check to the required checks of the
//! default branch. Only existing protection is extended; an unprotected
//! branch is an error, never a reason to create protection from scratch.
//!
//! The update is a plain read-modify-write. Another actor changing the
//! required checks between the read and the write loses their change.

use kitegen_client::SourceHost;
use kitegen_core::dto::protection::UpdateRequiredStatusChecks;
use kitegen_core::types::{ProjectName, ProvisionTarget};
use tracing::{info, warn};

use super::error::{ProvisionError, Result};

/// What happened to the branch's required status checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtectionOutcome {
    /// The context was appended; holds the contexts the source host now requires
    Extended { contexts: Vec<String> },
    /// The context was already required, nothing was written
    AlreadyRequired { context: String },
}

/// Require the project's status check on its default branch
///
/// The contexts are always computed from the record just fetched, so checks
/// already enforced on the branch are kept in their original order.
pub async fn extend_branch_protection<S>(
    source: &S,
    target: &ProvisionTarget,
    name: &ProjectName,
) -> Result<ProtectionOutcome>
where
    S: SourceHost + ?Sized,
{
    let owner = target.source_org.as_str();
    let branch = target.default_branch.as_str();

    let protection = source
        .get_branch_protection(owner, name.as_str(), branch)
        .await
        .map_err(|source| {
            if source.is_not_found() {
                ProvisionError::BranchNotProtected {
                    branch: branch.to_string(),
                    source,
                }
            } else {
                ProvisionError::RetrieveProtection(source)
            }
        })?;

    let checks = protection
        .required_status_checks
        .ok_or_else(|| ProvisionError::StatusChecksDisabled {
            branch: branch.to_string(),
        })?;

    let context = target.status_context(name);

    let Some(contexts) = checks.extended_with(&context) else {
        warn!("{} is already required on {}/{}@{}", context, owner, name, branch);
        return Ok(ProtectionOutcome::AlreadyRequired { context });
    };

    let updated = source
        .update_required_status_checks(
            owner,
            name.as_str(),
            branch,
            &UpdateRequiredStatusChecks { contexts },
        )
        .await
        .map_err(ProvisionError::UpdateProtection)?;

    info!("Required {} on {}/{}@{}", context, owner, name, branch);

    Ok(ProtectionOutcome::Extended {
        contexts: updated.contexts,
    })
}
