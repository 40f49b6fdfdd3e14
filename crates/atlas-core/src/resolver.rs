//! Host collaborator abstractions
//!
//! The engine never touches the filesystem. Hosts hand it file handles and
//! implement these traits over whatever index they keep:
//!
//! ```text
//! ┌──────────────────┐   FileRef list     ┌────────────────┐
//! │   Host (vault)   │ ─────────────────▶ │ EntityScanner  │
//! │  - MetadataSource│ ◀── metadata() ─── │  SchemaMatcher │
//! │  - LinkResolver  │ ◀── resolve() ──── │  Comparator    │
//! └──────────────────┘                    └────────────────┘
//! ```

use crate::error::Result;
use crate::properties::PropertyMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a note supplied by the host file store
///
/// `path` is the host-relative path with `/` separators. `basename` is the file
/// name without its extension and `extension` has no leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileRef {
    pub path: String,
    pub basename: String,
    pub extension: String,
}

impl FileRef {
    /// Build a handle from a `/`-separated path, deriving basename and extension
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path);
        let (basename, extension) = match name.rfind('.') {
            Some(idx) if idx > 0 => (name[..idx].to_string(), name[idx + 1..].to_string()),
            _ => (name.to_string(), String::new()),
        };
        Self {
            path,
            basename,
            extension,
        }
    }

    /// File name including extension
    pub fn name(&self) -> String {
        if self.extension.is_empty() {
            self.basename.clone()
        } else {
            format!("{}.{}", self.basename, self.extension)
        }
    }

    /// Folder portion of the path, empty for files at the root
    pub fn parent(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(parent, _)| parent)
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Resolves a link target to the canonical file it points at
///
/// `target` is already stripped of brackets and display text. `source` is the
/// file whose metadata contains the link, for hosts that resolve relative paths.
/// `Ok(None)` means the link is dangling; `Err` is reserved for host failures.
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, target: &str, source: &FileRef) -> Result<Option<FileRef>>;
}

/// Looks up the parsed metadata of a file
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Metadata for `file`, or `None` when the file carries no metadata block
    async fn metadata(&self, file: &FileRef) -> Result<Option<PropertyMap>>;
}

/// Resolver for hosts without a link index; every link is dangling
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl LinkResolver for NoopResolver {
    fn resolve(&self, _target: &str, _source: &FileRef) -> Result<Option<FileRef>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ref_parts() {
        let file = FileRef::new("atlas/entities/person.md");
        assert_eq!(file.basename, "person");
        assert_eq!(file.extension, "md");
        assert_eq!(file.name(), "person.md");
        assert_eq!(file.parent(), "atlas/entities");
    }

    #[test]
    fn test_file_ref_without_extension() {
        let file = FileRef::new("README");
        assert_eq!(file.basename, "README");
        assert_eq!(file.extension, "");
        assert_eq!(file.name(), "README");
        assert_eq!(file.parent(), "");
    }

    #[test]
    fn test_file_ref_dotfile_and_multiple_dots() {
        let hidden = FileRef::new(".obsidian/.hidden");
        assert_eq!(hidden.basename, ".hidden");
        assert_eq!(hidden.extension, "");

        let dotted = FileRef::new("notes/v1.2.release.md");
        assert_eq!(dotted.basename, "v1.2.release");
        assert_eq!(dotted.extension, "md");
    }

    #[test]
    fn test_noop_resolver_never_resolves() {
        let source = FileRef::new("a.md");
        assert_eq!(NoopResolver.resolve("a", &source), Ok(None));
    }
}
