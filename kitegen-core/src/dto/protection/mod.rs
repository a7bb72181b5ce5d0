//! Branch protection DTOs for the source host

use serde::{Deserialize, Serialize};

/// Partial update of a branch's required status checks
///
/// Carries only the contexts list; every other protection setting on the
/// branch is left as it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequiredStatusChecks {
    pub contexts: Vec<String>,
}
