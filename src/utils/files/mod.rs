#![allow(clippy::result_large_err)]

use crate::core::definition::{DefinitionFormat, NodeDefinition};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::fs;
use std::path::Path;

/// Reads node definition files for callers outside the conversion core.
pub struct DefinitionFileLoader {
    default_format: DefinitionFormat,
}

impl DefinitionFileLoader {
    /// `default_format` applies to files whose name carries no extension.
    pub fn new(default_format: &str) -> Self {
        DefinitionFileLoader {
            default_format: DefinitionFormat::from_tag(default_format),
        }
    }

    /// Load a definition; an explicit `format` wins over the file extension.
    pub fn load(&self, path: &Path, format: Option<&str>) -> Result<NodeDefinition, AppError> {
        let payload = fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read node definition {}: {}", path.display(), e),
            )
        })?;

        let label = path.display().to_string();
        let format = match format {
            Some(tag) => DefinitionFormat::from_tag(tag),
            None if path.extension().is_some() => DefinitionFormat::from_file_name(&label),
            None => self.default_format.clone(),
        };

        tracing::debug!(definition = %label, %format, bytes = payload.len(), "loaded node definition");
        Ok(NodeDefinition::new(format, payload, label))
    }
}
