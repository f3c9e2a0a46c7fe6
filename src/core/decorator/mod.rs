#![allow(clippy::result_large_err)] // Decorator returns AppError so policy failures carry the violated invariant.

use crate::core::approval::{ApprovalLanguage, CommandApprover};
use crate::core::error::{AppError, CONTEXT_INVARIANT};
use crate::core::node::{NodeMode, RetentionPolicy, SharedNode};
use crate::core::types::ErrorCategory;
use std::sync::Arc;

const REQUIRED_EXECUTORS: u32 = 1;

/// Installs the policy every shared node must carry before it is handed out.
///
/// Only the converter registry owns a decorator, so the pre-approval below is
/// reachable solely for launch commands produced from orchestrator definitions.
#[derive(Clone)]
pub(crate) struct Decorator {
    approver: Arc<dyn CommandApprover>,
}

impl Decorator {
    pub(crate) fn new(approver: Arc<dyn CommandApprover>) -> Self {
        Self { approver }
    }

    pub(crate) fn decorate(&self, mut node: SharedNode) -> Result<SharedNode, AppError> {
        node.retention = RetentionPolicy::use_once();
        node.mode = NodeMode::Exclusive;

        // The command comes from the orchestrator, a trusted peer.
        if let Some(command) = node.launcher.command() {
            self.approver
                .preapprove(command, ApprovalLanguage::SystemCommand);
            tracing::info!(node = %node.name, %command, "pre-approved launch command");
        }

        if node.num_executors != REQUIRED_EXECUTORS {
            return Err(AppError::new(
                ErrorCategory::PolicyViolation,
                format!(
                    "shared nodes must have exactly one execution slot, '{}' declares {}",
                    node.name, node.num_executors
                ),
            )
            .with_code("NSH-POL-001")
            .with_detail(CONTEXT_INVARIANT, "num_executors == 1"));
        }

        Ok(node)
    }
}
