//! Sandbox pre-approval capability.
//!
//! The crate only consumes [`CommandApprover`]; the real approval subsystem
//! lives elsewhere. [`InMemoryApprovalRegistry`] backs the CLI and tests.

use dashmap::DashSet;
use serde::Serialize;
use std::fmt;

/// Language a pre-approved script is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalLanguage {
    /// Command lines executed by the host's shell.
    SystemCommand,
}

impl fmt::Display for ApprovalLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalLanguage::SystemCommand => write!(f, "system-command"),
        }
    }
}

/// Registers scripts as exempt from interactive security review.
///
/// Implementations must tolerate concurrent calls and repeated approval of the same script.
pub trait CommandApprover: Send + Sync + 'static {
    fn preapprove(&self, script: &str, language: ApprovalLanguage);
}

/// Process-local approval registry.
#[derive(Debug, Default)]
pub struct InMemoryApprovalRegistry {
    approved: DashSet<(ApprovalLanguage, String)>,
}

impl InMemoryApprovalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_approved(&self, script: &str, language: ApprovalLanguage) -> bool {
        self.approved.contains(&(language, script.to_string()))
    }

    /// Approved scripts for `language`, sorted for stable output.
    pub fn approved_scripts(&self, language: ApprovalLanguage) -> Vec<String> {
        let mut scripts: Vec<String> = self
            .approved
            .iter()
            .filter(|entry| entry.key().0 == language)
            .map(|entry| entry.key().1.clone())
            .collect();
        scripts.sort();
        scripts
    }

    pub fn len(&self) -> usize {
        self.approved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }
}

impl CommandApprover for InMemoryApprovalRegistry {
    fn preapprove(&self, script: &str, language: ApprovalLanguage) {
        if self.approved.insert((language, script.to_string())) {
            tracing::debug!(%language, "script added to approval registry");
        }
    }
}
