use crate::logging::layers::console::{ConsoleFormat, ConsoleOutput};
use crate::Result;
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

const DEFAULT_LEVEL: &str = "info";
const CONSOLE_VAR: &str = "NODESHARE_LOG_CONSOLE";
const FORMAT_VAR: &str = "NODESHARE_LOG_FORMAT";

/// Resolved logging configuration after reading config files and env overrides.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
    pub default_level: String,
    pub enable_file: bool,
    pub console_output: Option<ConsoleOutput>,
    pub console_format: ConsoleFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_level: DEFAULT_LEVEL.to_string(),
            enable_file: true,
            console_output: None,
            console_format: ConsoleFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Load configuration with deterministic precedence: defaults, config file, env overrides.
    pub fn load(workspace_root: Option<&Path>) -> Result<Self> {
        let mut config = LoggingConfig::default();
        if let Some(workspace) = workspace_root {
            if let Some(workspace_config) = Self::load_from_workspace(workspace)? {
                config.apply(workspace_config);
            }
        }
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_workspace(workspace_root: &Path) -> Result<Option<TomlLogging>> {
        let path = workspace_root
            .join(".nodeshare")
            .join("config")
            .join("logging.toml");
        Self::load_from_file(&path)
    }

    fn load_from_file(path: &Path) -> Result<Option<TomlLogging>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read logging config {}", path.display()))?;
        let parsed: TomlLogging = toml::from_str(&content)
            .with_context(|| format!("failed to parse logging config {}", path.display()))?;
        Ok(Some(parsed))
    }

    fn apply(&mut self, toml: TomlLogging) {
        if let Some(logging) = toml.logging {
            if let Some(log_dir) = logging.log_dir {
                self.log_dir = Some(PathBuf::from(log_dir));
            }
            if let Some(default_level) = logging.default_level {
                self.default_level = default_level;
            }
            if let Some(enable_file) = logging.enable_file {
                self.enable_file = enable_file;
            }
            if let Some(console_output) = logging.console_output {
                self.console_output = Some(console_output);
            }
            if let Some(console_format) = logging.console_format {
                self.console_format = console_format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(output) = env::var(CONSOLE_VAR) {
            let parsed = ConsoleOutput::from_str(&output).map_err(|err| anyhow!(err))?;
            self.console_output = Some(parsed);
        }
        if let Ok(format) = env::var(FORMAT_VAR) {
            self.console_format = ConsoleFormat::from_str(&format).map_err(|err| anyhow!(err))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        Directive::from_str(&self.default_level)
            .map_err(|_| anyhow!("logging.default_level must be a valid tracing directive"))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TomlLogging {
    pub logging: Option<TomlLoggingSection>,
}

#[derive(Debug, Deserialize)]
struct TomlLoggingSection {
    pub log_dir: Option<String>,
    pub default_level: Option<String>,
    pub enable_file: Option<bool>,
    #[serde(default)]
    pub console_output: Option<ConsoleOutput>,
    #[serde(default)]
    pub console_format: Option<ConsoleFormat>,
}
