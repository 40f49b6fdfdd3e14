//! Vault file discovery

use crate::error::{VaultError, VaultResult};
use atlas_config::VaultConfig;
use atlas_core::FileRef;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// List the vault's note files in path order
///
/// Paths are relative to `root` and always use `/` separators.
pub fn discover_files(root: &Path, config: &VaultConfig) -> VaultResult<Vec<FileRef>> {
    if !root.is_dir() {
        return Err(VaultError::NotADirectory(root.to_path_buf()));
    }

    let extensions: Vec<String> = config
        .extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .collect();

    let walker = WalkDir::new(root)
        .max_depth(config.max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, config));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable vault entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_extension(entry.path(), &extensions) {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(FileRef::new(vault_path(relative)));
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered vault files");
    Ok(files)
}

fn is_skipped(entry: &DirEntry, config: &VaultConfig) -> bool {
    let name = entry.file_name().to_string_lossy();
    if !config.include_hidden && name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && config.exclude_folders.iter().any(|f| *f == name)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext))
}

fn vault_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
