pub mod approval;
pub mod config;
pub mod converter;
pub(crate) mod decorator;
pub mod definition;
pub mod deserializer;
pub mod error;
pub mod node;
pub mod types;

pub use approval::{ApprovalLanguage, CommandApprover, InMemoryApprovalRegistry};
pub use config::{ConfigLoader, ConfigValidator, NodeshareConfig};
pub use converter::{
    Conversion, Converter, ConverterRegistry, ConverterRegistryBuilder, JsonConverter,
    XmlConverter,
};
pub use definition::{DefinitionFormat, FormatTag, NodeDefinition};
pub use deserializer::{DeserializeError, ObjectDeserializer, SerializedObject};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use node::{LaunchMechanism, NodeMode, RetentionPolicy, SharedNode};
pub use types::*;
