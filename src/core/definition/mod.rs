use std::fmt;
use std::path::Path;

const FORMAT_XML: &str = "xml";
const FORMAT_JSON: &str = "json";
const FORMAT_UNKNOWN: &str = "unknown";

/// Serialization scheme tag carried by a node definition.
///
/// Tags without a built-in variant are held in [`FormatTag`], which can only be
/// produced by [`DefinitionFormat::from_tag`], so `Other` never shadows `Xml` or `Json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefinitionFormat {
    Xml,
    Json,
    Other(FormatTag),
}

/// Normalized (trimmed, lowercase) tag of a format with no built-in variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatTag(String);

impl FormatTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DefinitionFormat {
    /// Parse a format tag; matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.as_str() {
            FORMAT_XML => DefinitionFormat::Xml,
            FORMAT_JSON => DefinitionFormat::Json,
            "" => DefinitionFormat::unknown(),
            _ => DefinitionFormat::Other(FormatTag(normalized)),
        }
    }

    /// Derive the format from a declaring file name's extension.
    pub fn from_file_name(file_name: &str) -> Self {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(DefinitionFormat::from_tag)
            .unwrap_or_else(DefinitionFormat::unknown)
    }

    fn unknown() -> Self {
        DefinitionFormat::Other(FormatTag(FORMAT_UNKNOWN.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            DefinitionFormat::Xml => FORMAT_XML,
            DefinitionFormat::Json => FORMAT_JSON,
            DefinitionFormat::Other(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for DefinitionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DefinitionFormat {
    fn from(value: String) -> Self {
        DefinitionFormat::from_tag(&value)
    }
}

impl From<DefinitionFormat> for String {
    fn from(value: DefinitionFormat) -> Self {
        value.as_str().to_string()
    }
}

/// Serialized, orchestrator-supplied description of a node to be created.
///
/// Fields are private so converters only ever see a read-only view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDefinition {
    format: DefinitionFormat,
    payload: String,
    source_file_name: String,
}

impl NodeDefinition {
    pub fn new(
        format: DefinitionFormat,
        payload: impl Into<String>,
        source_file_name: impl Into<String>,
    ) -> Self {
        Self {
            format,
            payload: payload.into(),
            source_file_name: source_file_name.into(),
        }
    }

    /// Create a definition whose format follows the declaring file's extension.
    pub fn from_file_name(source_file_name: impl Into<String>, payload: impl Into<String>) -> Self {
        let source_file_name = source_file_name.into();
        let format = DefinitionFormat::from_file_name(&source_file_name);
        Self::new(format, payload, source_file_name)
    }

    pub fn format(&self) -> &DefinitionFormat {
        &self.format
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Diagnostic label used in every failure raised for this definition.
    pub fn source_file_name(&self) -> &str {
        &self.source_file_name
    }
}
