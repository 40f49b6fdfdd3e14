//! Engine error types
//!
//! The matching engine reports data-shape problems through validation results,
//! not errors. The variants here cover infrastructure failures surfaced by host
//! collaborators and misuse of the scanner API.

use thiserror::Error;

/// Errors produced by the entity engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AtlasError {
    /// A scan was requested while another scan is still replacing the result set
    #[error("a scan is already in progress")]
    ScanInProgress,

    /// The host link resolver failed (I/O, index unavailable, ...)
    #[error("link resolution failed: {0}")]
    Resolver(String),

    /// The host metadata lookup failed for a file
    #[error("metadata lookup failed for {path}: {message}")]
    Metadata {
        /// Path of the file whose metadata could not be read
        path: String,
        /// Underlying failure description
        message: String,
    },

    /// A query named an entity type that no schema defines
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// Template metadata could not be rendered as frontmatter
    #[error("template rendering failed: {0}")]
    Render(String),
}

impl AtlasError {
    /// Create a resolver error
    pub fn resolver(msg: impl Into<String>) -> Self {
        Self::Resolver(msg.into())
    }

    /// Create a metadata lookup error
    pub fn metadata(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: msg.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, AtlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AtlasError::ScanInProgress.to_string(),
            "a scan is already in progress"
        );
        assert_eq!(
            AtlasError::metadata("notes/a.md", "permission denied").to_string(),
            "metadata lookup failed for notes/a.md: permission denied"
        );
        assert_eq!(
            AtlasError::UnknownEntityType("Ghost".into()).to_string(),
            "unknown entity type: Ghost"
        );
    }
}
