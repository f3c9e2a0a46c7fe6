//! Generic object deserialization consumed by format converters.

pub mod xml;

pub use xml::XmlObjectDeserializer;

use crate::core::node::SharedNode;

/// Failure raised while turning a payload into an object.
#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("payload is empty")]
    Empty,
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Object produced by an [`ObjectDeserializer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializedObject {
    Node(SharedNode),
    /// A well-formed object of some other type, identified by its type name.
    Other { type_name: String },
}

impl SerializedObject {
    pub fn type_name(&self) -> &str {
        match self {
            SerializedObject::Node(_) => "SharedNode",
            SerializedObject::Other { type_name } => type_name,
        }
    }
}

/// Turns a serialized payload into an in-memory object without touching I/O.
pub trait ObjectDeserializer: Send + Sync + 'static {
    fn from_serialized(&self, payload: &str) -> Result<SerializedObject, DeserializeError>;
}
