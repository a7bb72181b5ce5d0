//! Branch protection domain types
//!
//! The protection record is read immediately before it is extended and never
//! cached. There is no conditional update on the source host side, so a
//! concurrent edit between read and write is lost.

use serde::{Deserialize, Serialize};

/// Branch protection record of a single branch
///
/// Only the required status checks section is mapped; reviews, restrictions
/// and admin enforcement are never written by this tool and so never read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchProtection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub required_status_checks: Option<RequiredStatusChecks>,
}

/// Status checks that must pass before merging into the branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredStatusChecks {
    /// Require branches to be up to date before merging
    #[serde(default)]
    pub strict: bool,

    /// Required context identifiers, in the order the source host returns them
    #[serde(default)]
    pub contexts: Vec<String>,
}

impl RequiredStatusChecks {
    /// Check whether a context is already required
    pub fn requires(&self, context: &str) -> bool {
        self.contexts.iter().any(|c| c == context)
    }

    /// Contexts after adding `context` to the existing ones
    ///
    /// Existing entries keep their order and the new one goes last. Returns
    /// `None` when the context is already required, so callers never write a
    /// duplicate.
    pub fn extended_with(&self, context: &str) -> Option<Vec<String>> {
        if self.requires(context) {
            return None;
        }

        let mut contexts = self.contexts.clone();
        contexts.push(context.to_string());
        Some(contexts)
    }
}
