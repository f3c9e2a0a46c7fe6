//! Serialized node document shared by the built-in converters.
//!
//! XML carries `class` as an attribute (`@class`), JSON as a plain field.

use super::{LaunchMechanism, NodeMode, RetentionPolicy, SharedNode};
use crate::core::deserializer::DeserializeError;
use serde::Deserialize;

const DEFAULT_SSH_PORT: u16 = 22;
const DEFAULT_IDLE_MINUTES: u32 = 1;

fn default_num_executors() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeDocument {
    pub name: String,
    #[serde(rename = "nodeDescription", default)]
    pub node_description: Option<String>,
    #[serde(rename = "remoteFS", default)]
    pub remote_fs: Option<String>,
    #[serde(rename = "numExecutors", default = "default_num_executors")]
    pub num_executors: u32,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "retentionStrategy", default)]
    pub retention_strategy: Option<RetentionDocument>,
    pub launcher: Option<LauncherDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetentionDocument {
    #[serde(rename = "@class", alias = "class")]
    pub class: String,
    #[serde(rename = "idleMinutes", default)]
    pub idle_minutes: Option<u32>,
    #[serde(rename = "maxUses", default)]
    pub max_uses: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LauncherDocument {
    #[serde(rename = "@class", alias = "class")]
    pub class: String,
    #[serde(rename = "agentCommand", default)]
    pub agent_command: Option<String>,
    #[serde(rename = "workDir", default)]
    pub work_dir: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(rename = "credentialsId", default)]
    pub credentials_id: Option<String>,
}

impl NodeDocument {
    /// Build the node described by this document.
    pub fn into_node(self) -> Result<SharedNode, DeserializeError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(invalid("name", "node name must not be empty"));
        }

        let mode = match self.mode.as_deref() {
            Some(raw) => raw
                .parse::<NodeMode>()
                .map_err(|reason| invalid("mode", reason))?,
            None => NodeMode::default(),
        };

        let retention = match self.retention_strategy {
            Some(doc) => doc.into_policy()?,
            None => RetentionPolicy::default(),
        };

        let launcher = self
            .launcher
            .ok_or_else(|| invalid("launcher", "node definition declares no launcher"))?
            .into_mechanism()?;

        let labels = self
            .label
            .as_deref()
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Ok(SharedNode {
            name,
            description: non_blank(self.node_description),
            remote_fs: non_blank(self.remote_fs),
            labels,
            num_executors: self.num_executors,
            mode,
            retention,
            launcher,
        })
    }
}

impl RetentionDocument {
    fn into_policy(self) -> Result<RetentionPolicy, DeserializeError> {
        match normalize_class(&self.class).as_str() {
            "always" => Ok(RetentionPolicy::Always),
            "demand" => Ok(RetentionPolicy::Demand {
                idle_minutes: self.idle_minutes.unwrap_or(DEFAULT_IDLE_MINUTES),
            }),
            "once" => Ok(RetentionPolicy::Once {
                max_uses: self.max_uses.unwrap_or(1),
            }),
            _ => Err(invalid(
                "retentionStrategy",
                format!("unsupported retention class '{}'", self.class),
            )),
        }
    }
}

impl LauncherDocument {
    fn into_mechanism(self) -> Result<LaunchMechanism, DeserializeError> {
        match normalize_class(&self.class).as_str() {
            "command" => {
                // The XML reader already drops surrounding whitespace; JSON is trimmed here
                // so the approved string is the same whichever format carried it.
                let command = self
                    .agent_command
                    .as_deref()
                    .map(str::trim)
                    .filter(|command| !command.is_empty())
                    .ok_or_else(|| invalid("launcher", "command launcher requires agentCommand"))?;
                Ok(LaunchMechanism::Command {
                    command: command.to_string(),
                })
            }
            "inbound" => Ok(LaunchMechanism::Inbound {
                work_dir: non_blank(self.work_dir),
            }),
            "ssh" => {
                let host = non_blank(self.host)
                    .ok_or_else(|| invalid("launcher", "ssh launcher requires host"))?;
                Ok(LaunchMechanism::Ssh {
                    host,
                    port: self.port.unwrap_or(DEFAULT_SSH_PORT),
                    credentials_id: non_blank(self.credentials_id),
                })
            }
            _ => Err(invalid(
                "launcher",
                format!("unsupported launcher class '{}'", self.class),
            )),
        }
    }
}

// Classes may be given fully qualified (`hudson.slaves.CommandLauncher`) or short (`command`).
fn normalize_class(class: &str) -> String {
    let simple = class.rsplit('.').next().unwrap_or(class).to_ascii_lowercase();
    let trimmed = simple
        .strip_suffix("launcher")
        .or_else(|| simple.strip_suffix("retentionstrategy"))
        .unwrap_or(&simple);
    match trimmed {
        "jnlp" => "inbound".to_string(),
        "" => simple.clone(),
        other => other.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> DeserializeError {
    DeserializeError::InvalidField {
        field,
        reason: reason.into(),
    }
}
