use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// No registered converter recognized the definition format.
    NoConverterFound,
    /// A converter recognized the format but the payload is unusable.
    InvalidDefinition,
    /// A converted node cannot satisfy the shared-node invariants.
    PolicyViolation,
    ValidationError,
    SerializationError,
    IoError,
    InternalError,
    Unknown,
}

impl ErrorCategory {
    /// Categories surfaced to users as "the node definition is unusable".
    pub fn is_unusable_definition(self) -> bool {
        matches!(
            self,
            ErrorCategory::NoConverterFound
                | ErrorCategory::InvalidDefinition
                | ErrorCategory::PolicyViolation
        )
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Info,
}
