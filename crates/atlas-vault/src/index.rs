//! In-memory vault snapshot
//!
//! [`VaultIndex`] holds every discovered file and its parsed frontmatter and
//! serves both host collaborators of the entity engine: metadata lookup and
//! link resolution.
//!
//! ## Link resolution
//!
//! Targets are resolved the way Obsidian treats them, with folder paths as
//! hints rather than requirements. Any `#heading` or `#^block` suffix is
//! ignored. Candidates are tried in order:
//!
//! 1. Exact vault path, case-insensitive, with or without `.md`
//! 2. Path relative to the linking note's folder
//! 3. File name anywhere in the vault, shortest path first

use crate::error::VaultResult;
use crate::frontmatter::parse_frontmatter;
use crate::walker::discover_files;
use async_trait::async_trait;
use atlas_config::VaultConfig;
use atlas_core::{FileRef, LinkResolver, MetadataSource, PropertyMap, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

const NOTE_EXTENSION: &str = ".md";

/// Files of a vault with their frontmatter
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    files: Vec<FileRef>,
    metadata: HashMap<String, PropertyMap>,
    /// Lower-cased path to position in `files`
    by_path: HashMap<String, usize>,
    /// Lower-cased basename and file name to positions, best candidate first
    by_name: HashMap<String, Vec<usize>>,
}

impl VaultIndex {
    /// Discover and read every note under `root`
    ///
    /// Unreadable files and malformed frontmatter are logged and indexed
    /// without metadata.
    pub async fn load(root: &Path, config: &VaultConfig) -> VaultResult<Self> {
        let files = discover_files(root, config)?;
        let mut entries = Vec::with_capacity(files.len());

        for file in files {
            let metadata = match tokio::fs::read_to_string(root.join(&file.path)).await {
                Ok(content) => match parse_frontmatter(&content) {
                    Ok(metadata) => metadata,
                    Err(err) => {
                        warn!(file = %file, error = %err, "ignoring malformed frontmatter");
                        None
                    }
                },
                Err(err) => {
                    warn!(file = %file, error = %err, "could not read vault file");
                    None
                }
            };
            entries.push((file, metadata));
        }

        let index = Self::from_entries(entries);
        info!(
            root = %root.display(),
            files = index.len(),
            with_metadata = index.metadata.len(),
            "vault indexed"
        );
        Ok(index)
    }

    /// Build an index from files and their metadata, keeping the given order
    pub fn from_entries(entries: Vec<(FileRef, Option<PropertyMap>)>) -> Self {
        let mut index = Self::default();

        for (position, (file, metadata)) in entries.into_iter().enumerate() {
            index.by_path.entry(file.path.to_lowercase()).or_insert(position);

            let basename = file.basename.to_lowercase();
            let name = file.name().to_lowercase();
            if name != basename {
                index.by_name.entry(name).or_default().push(position);
            }
            index.by_name.entry(basename).or_default().push(position);

            if let Some(metadata) = metadata {
                index.metadata.insert(file.path.clone(), metadata);
            }
            index.files.push(file);
        }

        let files = &index.files;
        for candidates in index.by_name.values_mut() {
            candidates.sort_by(|&a, &b| {
                let (a, b) = (&files[a].path, &files[b].path);
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            });
        }

        index
    }

    /// Files in host order
    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve `target` as linked from `source`
    pub fn lookup(&self, target: &str, source: &FileRef) -> Option<&FileRef> {
        let target = target.split('#').next().unwrap_or_default().trim();
        if target.is_empty() {
            return None;
        }
        let key = target.to_lowercase();

        if let Some(file) = self.by_vault_path(&key) {
            return Some(file);
        }

        let folder = source.parent();
        if !folder.is_empty() {
            let relative = format!("{}/{}", folder.to_lowercase(), key);
            if let Some(file) = self.by_vault_path(&relative) {
                return Some(file);
            }
        }

        let name = key.rsplit('/').next().unwrap_or(&key);
        self.by_name
            .get(name)
            .and_then(|candidates| candidates.first())
            .map(|&position| &self.files[position])
    }

    fn by_vault_path(&self, key: &str) -> Option<&FileRef> {
        self.by_path
            .get(key)
            .or_else(|| self.by_path.get(&format!("{}{}", key, NOTE_EXTENSION)))
            .map(|&position| &self.files[position])
    }
}

#[async_trait]
impl MetadataSource for VaultIndex {
    async fn metadata(&self, file: &FileRef) -> Result<Option<PropertyMap>> {
        Ok(self.metadata.get(&file.path).cloned())
    }
}

impl LinkResolver for VaultIndex {
    fn resolve(&self, target: &str, source: &FileRef) -> Result<Option<FileRef>> {
        Ok(self.lookup(target, source).cloned())
    }
}
