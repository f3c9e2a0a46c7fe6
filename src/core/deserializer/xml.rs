use super::{DeserializeError, ObjectDeserializer, SerializedObject};
use crate::core::node::NodeDocument;
use quick_xml::events::Event;
use quick_xml::Reader;

const SHARED_NODE_ELEMENT: &str = "sharedNode";

/// XML deserializer where the root element name selects the object type.
#[derive(Debug, Clone, Default)]
pub struct XmlObjectDeserializer;

impl XmlObjectDeserializer {
    pub fn new() -> Self {
        Self
    }
}

impl ObjectDeserializer for XmlObjectDeserializer {
    fn from_serialized(&self, payload: &str) -> Result<SerializedObject, DeserializeError> {
        if payload.trim().is_empty() {
            return Err(DeserializeError::Empty);
        }

        let root = root_element(payload)?;
        if !is_node_element(&root) {
            return Ok(SerializedObject::Other { type_name: root });
        }

        let document: NodeDocument = quick_xml::de::from_str(payload)
            .map_err(|err| DeserializeError::Malformed(err.to_string()))?;
        Ok(SerializedObject::Node(document.into_node()?))
    }
}

// Root may be written short (`sharedNode`) or package qualified (`com.acme.SharedNode`).
fn is_node_element(name: &str) -> bool {
    let simple = name.rsplit('.').next().unwrap_or(name);
    simple.eq_ignore_ascii_case(SHARED_NODE_ELEMENT)
}

/// Walk the whole document and return the root element name.
///
/// Only whitespace, comments and processing instructions may follow the root's end tag.
fn root_element(payload: &str) -> Result<String, DeserializeError> {
    let mut reader = Reader::from_str(payload);
    let mut root: Option<String> = None;
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| DeserializeError::Malformed(err.to_string()))?;
        match event {
            Event::Start(element) | Event::Empty(element) if root.is_some() && depth == 0 => {
                return Err(DeserializeError::Malformed(format!(
                    "unexpected element '{}' after the root element",
                    String::from_utf8_lossy(element.name().as_ref())
                )));
            }
            Event::Start(element) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(element.name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(element.name().as_ref()).into_owned());
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(text) if depth == 0 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(DeserializeError::Malformed(
                        "text content outside of the root element".to_string(),
                    ));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(DeserializeError::Malformed(
                    "character data outside of the root element".to_string(),
                ));
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(DeserializeError::Malformed(
                        "root element is not closed".to_string(),
                    ));
                }
                return root.ok_or_else(|| {
                    DeserializeError::Malformed("document has no root element".to_string())
                });
            }
            _ => {}
        }
    }
}
