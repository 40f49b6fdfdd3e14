use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a vault
#[derive(Debug, Error)]
pub enum VaultError {
    /// The vault root is missing or not a directory
    #[error("vault root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A frontmatter block is not valid YAML
    #[error("invalid frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
}

pub type VaultResult<T> = Result<T, VaultError>;
