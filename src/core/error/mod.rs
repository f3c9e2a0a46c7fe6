use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Context key carrying the diagnostic label of the offending definition.
pub const CONTEXT_DEFINITION: &str = "definition";
/// Context key carrying the name of the converter that rejected a definition.
pub const CONTEXT_CONVERTER: &str = "converter";
/// Context key carrying the shared-node invariant that could not be satisfied.
pub const CONTEXT_INVARIANT: &str = "invariant";

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: BTreeMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::NoConverterFound
            | ErrorCategory::InvalidDefinition
            | ErrorCategory::PolicyViolation
            | ErrorCategory::ValidationError
            | ErrorCategory::SerializationError
            | ErrorCategory::IoError
            | ErrorCategory::InternalError => ErrorSeverity::Error,
            ErrorCategory::Unknown => ErrorSeverity::Info,
        };
        AppError {
            category,
            severity,
            code: format!("ERR-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            context: BTreeMap::new(),
            recovery_suggestions: default_suggestions(category),
            occurred_at: chrono::Utc::now(),
            source: None,
        }
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    /// Attach a keyed diagnostic detail, replacing any previous value for the key.
    pub fn with_detail<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    /// Whether the failure belongs to the user-facing "definition is unusable" class.
    pub fn is_unusable_definition(&self) -> bool {
        self.category.is_unusable_definition()
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

fn default_suggestions(category: ErrorCategory) -> Vec<String> {
    match category {
        ErrorCategory::NoConverterFound => {
            vec!["Register a converter for the definition format".to_string()]
        }
        ErrorCategory::InvalidDefinition => {
            vec!["Regenerate the node definition on the orchestrator".to_string()]
        }
        ErrorCategory::PolicyViolation => {
            vec!["Declare exactly one executor in the node definition".to_string()]
        }
        _ => vec![],
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            write!(f, " (Context: {:?})", self.context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError {
            category: ErrorCategory::InternalError,
            severity: ErrorSeverity::Error,
            code: "ANYHOW_ERROR".to_string(),
            message: e.to_string(),
            context: BTreeMap::new(),
            recovery_suggestions: vec!["Check the error details".to_string()],
            occurred_at: Utc::now(),
            source: Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError {
            category: ErrorCategory::IoError,
            severity: ErrorSeverity::Error,
            code: "IO_ERROR".to_string(),
            message: e.to_string(),
            context: BTreeMap::new(),
            recovery_suggestions: vec!["Check file permissions and paths".to_string()],
            occurred_at: Utc::now(),
            source: Some(anyhow::anyhow!(e)),
        }
    }
}

pub trait ErrorReporter {
    fn report_error(&self, error: &AppError);
    fn report_warning(&self, message: &str, context: Option<String>);
}

pub struct DefaultErrorReporter;

impl DefaultErrorReporter {
    pub fn new() -> Self {
        DefaultErrorReporter
    }
}

impl Default for DefaultErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for DefaultErrorReporter {
    fn report_error(&self, error: &AppError) {
        eprintln!("[ERROR] {}: {}", error.code, error.message);
        if error.is_unusable_definition() {
            eprintln!("  Node definition is unusable ({})", error.category);
        }
        if !error.context.is_empty() {
            eprintln!("  Context: {:?}", error.context);
        }
        if let Some(ref source) = error.source {
            eprintln!("  Caused by: {}", source);
        }
        for suggestion in &error.recovery_suggestions {
            eprintln!("  Hint: {}", suggestion);
        }
    }

    fn report_warning(&self, message: &str, context: Option<String>) {
        eprintln!("[WARNING] {}", message);
        if let Some(ref ctx) = context {
            eprintln!("  Context: {}", ctx);
        }
    }
}
