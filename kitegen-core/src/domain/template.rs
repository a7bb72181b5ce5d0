//! Pipeline template document
//!
//! The minimal pipeline definition dropped into the repository. It is left
//! on disk for a human to commit through a pull request.

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{UPLOAD_COMMAND, UPLOAD_LABEL};
use crate::types::ProjectName;

/// Pipeline definition document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTemplate {
    pub name: String,
    pub description: String,
    pub steps: Vec<TemplateStep>,
}

/// A single step of the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateStep {
    pub command: String,
    pub label: String,
}

impl PipelineTemplate {
    /// Render the template for a project
    pub fn for_project(name: &ProjectName) -> Self {
        Self {
            name: name.to_string(),
            description: format!("{} build pipeline", name),
            steps: vec![TemplateStep {
                command: UPLOAD_COMMAND.to_string(),
                label: UPLOAD_LABEL.to_string(),
            }],
        }
    }
}
