#![allow(clippy::result_large_err)]

use super::{ConfigValidator, NodeshareConfig};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "nodeshare.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/nodeshare.toml)
    /// Environment variables override config file values
    /// A missing file yields defaults plus env overrides
    pub fn load_from_workspace(workspace_path: &Path) -> Result<NodeshareConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let config_file = Self::load_from_file(&config_path)?;

        let mut config = config_file.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;

        tracing::debug!(
            path = %config_path.display(),
            converters = ?config.converters.order,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<NodeshareConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: NodeshareConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(config: &mut NodeshareConfig) {
        if let Ok(order) = env::var("NODESHARE_CONVERTERS") {
            config.converters.order = order
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(default_format) = env::var("NODESHARE_DEFAULT_FORMAT") {
            config.definitions.default_format = default_format.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_nodeshare_env() {
        for v in &["NODESHARE_CONVERTERS", "NODESHARE_DEFAULT_FORMAT"] {
            env::remove_var(v);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_nonexistent() {
        clear_nodeshare_env();
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
        assert_eq!(result.converters.order, vec!["xml", "json"]);
        assert_eq!(result.definitions.default_format, "xml");
    }

    #[test]
    #[serial]
    fn test_load_config_valid() {
        clear_nodeshare_env();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
[converters]
order = ["json", "xml"]

[definitions]
default_format = "json"
"#,
        )
        .unwrap();

        let result = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
        assert_eq!(result.converters.order, vec!["json", "xml"]);
        assert_eq!(result.definitions.default_format, "json");
    }

    #[test]
    #[serial]
    fn test_load_config_invalid() {
        clear_nodeshare_env();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid toml {{").unwrap();

        let result = ConfigLoader::load_from_workspace(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_nodeshare_env();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[converters]\norder = [\"xml\"]\n",
        )
        .unwrap();
        env::set_var("NODESHARE_CONVERTERS", "json, xml");
        env::set_var("NODESHARE_DEFAULT_FORMAT", "json");

        let result = ConfigLoader::load_from_workspace(temp_dir.path());
        clear_nodeshare_env();
        let config = result.unwrap();
        assert_eq!(config.converters.order, vec!["json", "xml"]);
        assert_eq!(config.definitions.default_format, "json");
    }

    #[test]
    #[serial]
    fn test_unknown_converter_in_env_is_rejected() {
        clear_nodeshare_env();
        let temp_dir = TempDir::new().unwrap();
        env::set_var("NODESHARE_CONVERTERS", "yaml");
        let result = ConfigLoader::load_from_workspace(temp_dir.path());
        clear_nodeshare_env();
        assert!(result.is_err());
    }
}
