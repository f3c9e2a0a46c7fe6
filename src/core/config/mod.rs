pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

use crate::core::converter::BUILTIN_CONVERTERS;
use serde::{Deserialize, Serialize};

/// Main configuration loaded from nodeshare.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NodeshareConfig {
    /// Converter configuration
    #[serde(default)]
    pub converters: ConvertersConfig,

    /// Definition handling configuration
    #[serde(default)]
    pub definitions: DefinitionsConfig,
}

/// Converter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertersConfig {
    /// Built-in converters to register, highest priority first
    #[serde(default = "default_converter_order")]
    pub order: Vec<String>,
}

/// Definition handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionsConfig {
    /// Format assumed for definition files without an extension
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_converter_order() -> Vec<String> {
    BUILTIN_CONVERTERS.iter().map(|name| name.to_string()).collect()
}

fn default_format() -> String {
    "xml".to_string()
}

impl Default for ConvertersConfig {
    fn default() -> Self {
        ConvertersConfig {
            order: default_converter_order(),
        }
    }
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        DefinitionsConfig {
            default_format: default_format(),
        }
    }
}
