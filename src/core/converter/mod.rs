#![allow(clippy::result_large_err)] // Converter trait and registry return AppError directly for structured diagnostics without boxing.

pub mod json;
pub mod xml;

pub use json::JsonConverter;
pub use xml::XmlConverter;

use crate::core::approval::CommandApprover;
use crate::core::config::NodeshareConfig;
use crate::core::decorator::Decorator;
use crate::core::definition::NodeDefinition;
use crate::core::deserializer::DeserializeError;
use crate::core::error::{AppError, CONTEXT_CONVERTER, CONTEXT_DEFINITION};
use crate::core::node::SharedNode;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use std::sync::Arc;

/// Names of the converters shipped with the crate, in default priority order.
pub const BUILTIN_CONVERTERS: &[&str] = &[XmlConverter::NAME, JsonConverter::NAME];

/// Outcome of asking a converter to handle a definition.
#[derive(Debug)]
pub enum Conversion {
    /// The converter understood the definition and built a node.
    Created(SharedNode),
    /// The definition's format is not handled by this converter.
    Declined,
    /// The format was recognized but the definition is unusable.
    Failed(AppError),
}

impl Conversion {
    pub fn is_declined(&self) -> bool {
        matches!(self, Conversion::Declined)
    }
}

/// Trait implemented by node definition converters.
pub trait Converter: Send + Sync + 'static {
    /// Unique converter name used in configuration and diagnostics.
    fn name(&self) -> &'static str;

    /// Build a node from the definition, decline it, or reject it as invalid.
    fn create(&self, definition: &NodeDefinition) -> Conversion;
}

/// Build the `InvalidDefinition` failure a converter reports for a recognized but unusable payload.
pub fn invalid_definition(definition: &NodeDefinition, source: DeserializeError) -> AppError {
    AppError::with_source(
        ErrorCategory::InvalidDefinition,
        format!(
            "invalid node definition {}: {}",
            definition.source_file_name(),
            source
        ),
        Box::new(source),
    )
    .with_code("NSH-CONV-002")
    .with_detail(CONTEXT_DEFINITION, definition.source_file_name())
}

/// Look up a built-in converter by name.
pub fn builtin_converter(name: &str) -> Option<Arc<dyn Converter>> {
    match name {
        XmlConverter::NAME => Some(Arc::new(XmlConverter::new())),
        JsonConverter::NAME => Some(Arc::new(JsonConverter::new())),
        _ => None,
    }
}

/// Builder used to register converters before any definition is transformed.
pub struct ConverterRegistryBuilder {
    converters: IndexMap<String, Arc<dyn Converter>>,
    approver: Arc<dyn CommandApprover>,
}

impl ConverterRegistryBuilder {
    pub fn new(approver: Arc<dyn CommandApprover>) -> Self {
        Self {
            converters: IndexMap::new(),
            approver,
        }
    }

    /// Append a converter; it is consulted after every converter registered before it.
    pub fn register<T: Converter>(&mut self, converter: T) -> Result<&mut Self, AppError> {
        self.register_shared(Arc::new(converter))
    }

    pub fn register_shared(
        &mut self,
        converter: Arc<dyn Converter>,
    ) -> Result<&mut Self, AppError> {
        let name = converter.name();
        if self.converters.contains_key(name) {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!("duplicate converter registered: {}", name),
            )
            .with_code("NSH-REG-001")
            .with_detail(CONTEXT_CONVERTER, name));
        }
        tracing::debug!(
            converter = name,
            priority = self.converters.len(),
            "registered converter"
        );
        self.converters.insert(name.to_string(), converter);
        Ok(self)
    }

    pub fn build(self) -> ConverterRegistry {
        ConverterRegistry {
            converters: Arc::new(self.converters),
            decorator: Decorator::new(self.approver),
        }
    }
}

/// Immutable, ordered converter registry shared by every transform call.
#[derive(Clone)]
pub struct ConverterRegistry {
    converters: Arc<IndexMap<String, Arc<dyn Converter>>>,
    decorator: Decorator,
}

impl ConverterRegistry {
    pub fn builder(approver: Arc<dyn CommandApprover>) -> ConverterRegistryBuilder {
        ConverterRegistryBuilder::new(approver)
    }

    /// Registry holding the built-in converters in their default order.
    pub fn with_defaults(approver: Arc<dyn CommandApprover>) -> Self {
        let mut builder = ConverterRegistryBuilder::new(approver);
        for name in BUILTIN_CONVERTERS {
            if let Some(converter) = builtin_converter(name) {
                builder.converters.insert(name.to_string(), converter);
            }
        }
        builder.build()
    }

    /// Registry holding the built-in converters in the configured order.
    pub fn from_config(
        config: &NodeshareConfig,
        approver: Arc<dyn CommandApprover>,
    ) -> Result<Self, AppError> {
        let mut builder = ConverterRegistryBuilder::new(approver);
        for name in &config.converters.order {
            let converter = builtin_converter(name).ok_or_else(|| {
                AppError::new(
                    ErrorCategory::ValidationError,
                    format!(
                        "unknown converter '{}'; available converters are {}",
                        name,
                        BUILTIN_CONVERTERS.join(", ")
                    ),
                )
                .with_code("NSH-REG-002")
                .with_detail(CONTEXT_CONVERTER, name.as_str())
            })?;
            builder.register_shared(converter)?;
        }
        Ok(builder.build())
    }

    /// Converter names in lookup priority order.
    pub fn converter_names(&self) -> Vec<&str> {
        self.converters.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Turn a definition into a decorated shared node.
    ///
    /// Converters are asked in registration order and the first one that does not
    /// decline decides the outcome. A converter failure is final; later converters
    /// are never consulted for a definition an earlier one rejected.
    pub fn transform(&self, definition: NodeDefinition) -> Result<SharedNode, AppError> {
        let label = definition.source_file_name();
        for (name, converter) in self.converters.iter() {
            tracing::debug!(converter = %name, definition = %label, "trying converter");
            match converter.create(&definition) {
                Conversion::Declined => continue,
                Conversion::Created(node) => {
                    return match self.decorator.decorate(node) {
                        Ok(node) => {
                            tracing::info!(
                                converter = %name,
                                definition = %label,
                                node = %node.name,
                                "transformed node definition"
                            );
                            Ok(node)
                        }
                        Err(mut err) => {
                            err.message = format!("{}: {}", label, err.message);
                            let err = err
                                .with_detail(CONTEXT_DEFINITION, label)
                                .with_detail(CONTEXT_CONVERTER, name.as_str());
                            tracing::warn!(error = %err, "node violates shared node policy");
                            Err(err)
                        }
                    };
                }
                Conversion::Failed(err) => {
                    let err = err
                        .with_detail(CONTEXT_DEFINITION, label)
                        .with_detail(CONTEXT_CONVERTER, name.as_str());
                    tracing::warn!(error = %err, "converter rejected node definition");
                    return Err(err);
                }
            }
        }

        let err = AppError::new(
            ErrorCategory::NoConverterFound,
            format!(
                "no converter to process {} (format '{}')",
                label,
                definition.format()
            ),
        )
        .with_code("NSH-CONV-001")
        .with_detail(CONTEXT_DEFINITION, label);
        tracing::warn!(error = %err, "no converter accepted node definition");
        Err(err)
    }
}
