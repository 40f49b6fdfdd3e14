use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A structural problem found in a schema document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Position of the schema in the document, `None` for document-level issues
    pub index: Option<usize>,
    /// Schema name, when one could be read
    pub name: Option<String>,
    pub message: String,
}

impl SchemaIssue {
    pub(crate) fn document(message: impl Into<String>) -> Self {
        Self {
            index: None,
            name: None,
            message: message.into(),
        }
    }

    pub(crate) fn at(index: usize, name: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            name: name.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.index, &self.name) {
            (Some(index), Some(name)) => write!(f, "schema #{} ({}): {}", index, name, self.message),
            (Some(index), None) => write!(f, "schema #{}: {}", index, self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A setting holds a value the application cannot use
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// The schema document failed structural validation
    #[error("schema document has {} issue(s): {}", .0.len(), join_issues(.0))]
    InvalidSchemas(Vec<SchemaIssue>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
