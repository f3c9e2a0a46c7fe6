use super::{invalid_definition, Conversion, Converter};
use crate::core::definition::{DefinitionFormat, NodeDefinition};
use crate::core::deserializer::DeserializeError;
use crate::core::node::NodeDocument;

/// Converter for JSON definitions using the same document shape as XML.
#[derive(Debug, Default)]
pub struct JsonConverter;

impl JsonConverter {
    pub const NAME: &'static str = "json";

    pub fn new() -> Self {
        Self
    }
}

impl Converter for JsonConverter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create(&self, definition: &NodeDefinition) -> Conversion {
        if definition.format() != &DefinitionFormat::Json {
            return Conversion::Declined;
        }
        if definition.payload().trim().is_empty() {
            return Conversion::Failed(invalid_definition(definition, DeserializeError::Empty));
        }

        let document: NodeDocument = match serde_json::from_str(definition.payload()) {
            Ok(document) => document,
            Err(err) => {
                return Conversion::Failed(invalid_definition(
                    definition,
                    DeserializeError::Malformed(err.to_string()),
                ))
            }
        };

        match document.into_node() {
            Ok(node) => Conversion::Created(node),
            Err(err) => Conversion::Failed(invalid_definition(definition, err)),
        }
    }
}
