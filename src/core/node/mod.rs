pub mod document;

pub use document::{LauncherDocument, NodeDocument, RetentionDocument};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Scheduling mode of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeMode {
    /// Any job may be scheduled on the node.
    #[default]
    Normal,
    /// Only jobs explicitly bound to the node may run on it.
    Exclusive,
}

impl fmt::Display for NodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeMode::Normal => write!(f, "NORMAL"),
            NodeMode::Exclusive => write!(f, "EXCLUSIVE"),
        }
    }
}

impl FromStr for NodeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(NodeMode::Normal),
            "EXCLUSIVE" => Ok(NodeMode::Exclusive),
            _ => Err(format!(
                "unsupported mode '{}'; supported values are NORMAL, EXCLUSIVE",
                value
            )),
        }
    }
}

/// How long a node stays alive after it has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep the node online indefinitely.
    #[default]
    Always,
    /// Bring the node online on demand and release it after an idle period.
    Demand { idle_minutes: u32 },
    /// Release the node after it has run `max_uses` builds.
    Once { max_uses: u32 },
}

impl RetentionPolicy {
    /// Policy installed on every shared node: one use, then release.
    pub const fn use_once() -> Self {
        RetentionPolicy::Once { max_uses: 1 }
    }

    pub fn is_use_once(&self) -> bool {
        *self == RetentionPolicy::use_once()
    }
}

/// Mechanism used to bring the node's agent online.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchMechanism {
    /// Start the agent by running a command on the controller host.
    ///
    /// Leading and trailing whitespace of the declared command is not kept; the
    /// stored string is exactly what gets pre-approved.
    Command { command: String },
    /// The agent connects back on its own.
    Inbound { work_dir: Option<String> },
    /// Start the agent over SSH.
    Ssh {
        host: String,
        port: u16,
        credentials_id: Option<String>,
    },
}

impl LaunchMechanism {
    /// The launch command when the node is started by running a command.
    pub fn command(&self) -> Option<&str> {
        match self {
            LaunchMechanism::Command { command } => Some(command),
            _ => None,
        }
    }
}

/// Live, schedulable node produced from a node definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedNode {
    pub name: String,
    pub description: Option<String>,
    pub remote_fs: Option<String>,
    pub labels: Vec<String>,
    pub num_executors: u32,
    pub mode: NodeMode,
    pub retention: RetentionPolicy,
    pub launcher: LaunchMechanism,
}

impl SharedNode {
    pub fn new(name: impl Into<String>, launcher: LaunchMechanism) -> Self {
        Self {
            name: name.into(),
            description: None,
            remote_fs: None,
            labels: Vec::new(),
            num_executors: 1,
            mode: NodeMode::Normal,
            retention: RetentionPolicy::Always,
            launcher,
        }
    }

    pub fn with_executors(mut self, num_executors: u32) -> Self {
        self.num_executors = num_executors;
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Space separated label expression, as written in definitions.
    pub fn label_string(&self) -> String {
        self.labels.join(" ")
    }
}
