#![allow(clippy::result_large_err)]

use super::NodeshareConfig;
use crate::core::converter::BUILTIN_CONVERTERS;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::collections::HashSet;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &NodeshareConfig) -> Result<(), AppError> {
        if config.converters.order.is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "converters.order must list at least one converter",
            ));
        }

        let mut seen = HashSet::new();
        for name in &config.converters.order {
            if !BUILTIN_CONVERTERS.contains(&name.as_str()) {
                return Err(AppError::new(
                    ErrorCategory::ValidationError,
                    format!(
                        "converters.order names unknown converter '{}'; available converters are {}",
                        name,
                        BUILTIN_CONVERTERS.join(", ")
                    ),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(AppError::new(
                    ErrorCategory::ValidationError,
                    format!("converters.order lists '{}' more than once", name),
                ));
            }
        }

        if config.definitions.default_format.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "definitions.default_format cannot be empty",
            ));
        }

        Ok(())
    }
}
