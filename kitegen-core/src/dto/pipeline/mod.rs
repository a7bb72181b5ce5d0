//! Pipeline DTOs for the build service

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{UPLOAD_COMMAND, UPLOAD_LABEL};
use crate::types::{ProjectName, ProvisionTarget};

/// Trigger mode that builds on every pushed commit
pub const TRIGGER_MODE_CODE: &str = "code";

/// Step type for a plain command step
pub const STEP_TYPE_SCRIPT: &str = "script";

/// Request to create a new pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePipeline {
    pub name: String,
    pub repository: String,
    pub steps: Vec<PipelineStep>,
    pub default_branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub provider_settings: ProviderSettings,
    pub cancel_running_branch_builds: bool,
    pub cancel_running_branch_builds_filter: String,
}

/// A step in the pipeline's stored configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStep {
    #[serde(rename = "type")]
    pub step_type: String,
    pub name: String,
    pub command: String,
}

/// Source provider settings for a GitHub-backed pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub trigger_mode: String,
    pub build_pull_requests: bool,
    pub skip_pull_request_builds_for_existing_commits: bool,
    pub publish_commit_status: bool,
    /// Linked repository as `<org>/<name>`
    pub repository: String,
}

impl CreatePipeline {
    /// Build the creation request for a project
    ///
    /// The clone URL and the provider repository are both derived from the
    /// same name through the target, never supplied separately.
    pub fn for_project(target: &ProvisionTarget, name: &ProjectName) -> Self {
        Self {
            name: name.to_string(),
            repository: target.repository_url(name),
            steps: vec![PipelineStep {
                step_type: STEP_TYPE_SCRIPT.to_string(),
                name: UPLOAD_LABEL.to_string(),
                command: UPLOAD_COMMAND.to_string(),
            }],
            default_branch: target.default_branch.clone(),
            description: Some(format!("pipeline for {}", name)),
            provider_settings: ProviderSettings {
                trigger_mode: TRIGGER_MODE_CODE.to_string(),
                build_pull_requests: true,
                skip_pull_request_builds_for_existing_commits: true,
                publish_commit_status: true,
                repository: target.repository_slug(name),
            },
            cancel_running_branch_builds: true,
            cancel_running_branch_builds_filter: target.cancel_running_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_for_project() {
        let target = ProvisionTarget::default();
        let name = ProjectName::parse("foo").unwrap();

        let req = CreatePipeline::for_project(&target, &name);

        assert_eq!(req.name, "foo");
        assert_eq!(req.repository, "git@github.com:TriggerMail/foo.git");
        assert_eq!(req.provider_settings.repository, "TriggerMail/foo");
        assert_eq!(req.default_branch, "master");
        assert_eq!(req.cancel_running_branch_builds_filter, "!master");
        assert_eq!(req.steps.len(), 1);
    }

    #[test]
    fn test_repository_and_provider_agree() {
        let target = ProvisionTarget::default();

        for raw in ["foo", "payments", "svc-42"] {
            let name = ProjectName::parse(raw).unwrap();
            let req = CreatePipeline::for_project(&target, &name);

            assert_eq!(
                req.repository,
                format!("git@github.com:{}.git", req.provider_settings.repository)
            );
        }
    }

    #[test]
    fn test_request_wire_format() {
        let target = ProvisionTarget::default();
        let name = ProjectName::parse("foo").unwrap();

        let value = serde_json::to_value(CreatePipeline::for_project(&target, &name)).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "foo",
                "repository": "git@github.com:TriggerMail/foo.git",
                "steps": [{
                    "type": "script",
                    "name": ":pipeline:",
                    "command": "buildkite-agent pipeline upload"
                }],
                "default_branch": "master",
                "description": "pipeline for foo",
                "provider_settings": {
                    "trigger_mode": "code",
                    "build_pull_requests": true,
                    "skip_pull_request_builds_for_existing_commits": true,
                    "publish_commit_status": true,
                    "repository": "TriggerMail/foo"
                },
                "cancel_running_branch_builds": true,
                "cancel_running_branch_builds_filter": "!master"
            })
        );
    }
}
