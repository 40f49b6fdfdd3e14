//! Scanning a real vault on disk
//!
//! The index acts as both metadata source and link resolver, so link-typed
//! `is` values resolve through the vault's own files.

use atlas_config::{default_schemas, VaultConfig};
use atlas_core::{EntityScanner, SchemaMatcher};
use atlas_vault::VaultIndex;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_vault() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "type/person.md", "# Person\n");
    write(root, "type/project.md", "# Project\n");
    write(
        root,
        "people/ada.md",
        "---\nname: Ada Lovelace\nis: \"[[Person]]\"\n---\n",
    );
    write(root, "people/charles.md", "---\nis: \"[[type/person|a person]]\"\n---\n");
    write(
        root,
        "work/engine.md",
        "---\nname: Analytical Engine\nis: \"[[project]]\"\nstatus: active\n---\n",
    );
    write(root, "journal/today.md", "---\nmood: fine\n---\n");
    write(root, "journal/broken.md", "---\nis: [[person\n---\n");
    temp_dir
}

#[tokio::test]
async fn scans_vault_with_default_schemas() {
    let vault = sample_vault();
    let index = Arc::new(VaultIndex::load(vault.path(), &VaultConfig::default()).await.unwrap());

    let scanner = EntityScanner::new(SchemaMatcher::new(index.clone()), default_schemas());
    let instances = scanner.scan(index.files(), index.as_ref()).await.unwrap();

    let found: Vec<(&str, &str)> = instances
        .iter()
        .map(|i| (i.file.path.as_str(), i.entity_type.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("people/ada.md", "Person"),
            ("people/charles.md", "Person"),
            ("work/engine.md", "Project"),
        ]
    );

    assert_eq!(
        scanner.validation_summary().issues,
        vec!["people/charles.md: missing name".to_string()]
    );

    let counts = scanner.type_counts();
    assert_eq!(counts["Person"], 2);
    assert_eq!(counts["Organization"], 0);
    assert_eq!(counts["Project"], 1);
}
