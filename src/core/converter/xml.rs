use super::{invalid_definition, Conversion, Converter};
use crate::core::definition::{DefinitionFormat, NodeDefinition};
use crate::core::deserializer::{
    DeserializeError, ObjectDeserializer, SerializedObject, XmlObjectDeserializer,
};
use std::sync::Arc;

/// Default converter for XML definitions.
pub struct XmlConverter {
    deserializer: Arc<dyn ObjectDeserializer>,
}

impl XmlConverter {
    pub const NAME: &'static str = "xml";

    pub fn new() -> Self {
        Self {
            deserializer: Arc::new(XmlObjectDeserializer::new()),
        }
    }

    pub fn with_deserializer(deserializer: Arc<dyn ObjectDeserializer>) -> Self {
        Self { deserializer }
    }
}

impl Default for XmlConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for XmlConverter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create(&self, definition: &NodeDefinition) -> Conversion {
        if definition.format() != &DefinitionFormat::Xml {
            return Conversion::Declined;
        }

        match self.deserializer.from_serialized(definition.payload()) {
            Ok(SerializedObject::Node(node)) => Conversion::Created(node),
            Ok(SerializedObject::Other { type_name }) => Conversion::Failed(invalid_definition(
                definition,
                DeserializeError::Malformed(format!(
                    "expected a shared node, found '{}'",
                    type_name
                )),
            )),
            Err(err) => Conversion::Failed(invalid_definition(definition, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::{LaunchMechanism, SharedNode};
    use crate::core::types::ErrorCategory;

    struct StaticDeserializer(SerializedObject);

    impl ObjectDeserializer for StaticDeserializer {
        fn from_serialized(&self, _payload: &str) -> Result<SerializedObject, DeserializeError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn declines_other_formats() {
        let converter = XmlConverter::new();
        let definition =
            NodeDefinition::new(DefinitionFormat::Json, "{}", "node.json");
        assert!(converter.create(&definition).is_declined());
    }

    #[test]
    fn uses_injected_deserializer() {
        let node = SharedNode::new("injected", LaunchMechanism::Inbound { work_dir: None });
        let converter = XmlConverter::with_deserializer(Arc::new(StaticDeserializer(
            SerializedObject::Node(node.clone()),
        )));
        let definition = NodeDefinition::new(DefinitionFormat::Xml, "ignored", "node.xml");
        match converter.create(&definition) {
            Conversion::Created(created) => assert_eq!(created, node),
            other => panic!("unexpected conversion {:?}", other),
        }
    }

    #[test]
    fn non_node_object_is_invalid() {
        let converter = XmlConverter::with_deserializer(Arc::new(StaticDeserializer(
            SerializedObject::Other {
                type_name: "hudson.model.User".to_string(),
            },
        )));
        let definition = NodeDefinition::new(DefinitionFormat::Xml, "ignored", "user.xml");
        match converter.create(&definition) {
            Conversion::Failed(err) => {
                assert_eq!(err.category, ErrorCategory::InvalidDefinition);
                assert!(err.message.contains("hudson.model.User"));
                assert!(err.message.contains("user.xml"));
            }
            other => panic!("unexpected conversion {:?}", other),
        }
    }
}
