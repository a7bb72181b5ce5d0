//! Pipeline domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Command of the single bootstrap step; the agent uploads the real
/// pipeline definition from the repository at build time
pub const UPLOAD_COMMAND: &str = "buildkite-agent pipeline upload";

/// Label shown for the bootstrap step
pub const UPLOAD_LABEL: &str = ":pipeline:";

/// Pipeline as returned by the build service after creation
///
/// Only the fields this tool reads or reports are mapped; the rest of the
/// response is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
