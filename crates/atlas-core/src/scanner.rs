//! Entity scanning
//!
//! The scanner walks every file supplied by the host, tries each schema in
//! priority order and records the first match as an [`EntityInstance`]. The
//! held result set is replaced in a single swap once a scan completes, so
//! readers either see the previous scan or the new one, never a mix.
//!
//! ## Concurrency
//!
//! Scans are not re-entrant. A second `scan()` while one is running fails with
//! [`AtlasError::ScanInProgress`] instead of queueing. Query methods never block
//! on a running scan; they read the last completed result set.
//!
//! ## Copies
//!
//! Every query returns owned data. Nothing handed out aliases the scanner's
//! internal state.

use crate::error::{AtlasError, Result};
use crate::matcher::SchemaMatcher;
use crate::missing::missing_fields;
use crate::properties::PropertyMap;
use crate::resolver::{FileRef, MetadataSource};
use crate::schema::EntitySchema;
use crate::template::EntityTemplate;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A file recognized as an instance of a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInstance {
    /// The source file
    #[serde(rename = "fileRef")]
    pub file: FileRef,
    /// Name of the schema that matched
    pub entity_type: String,
    /// The file's full metadata at scan time
    pub properties: PropertyMap,
    /// Required fields absent from `properties`
    pub missing_properties: Vec<String>,
}

impl EntityInstance {
    /// Whether the instance is missing any required field
    pub fn has_drift(&self) -> bool {
        !self.missing_properties.is_empty()
    }

    /// Human-readable issue line, `None` for valid instances
    pub fn issue(&self) -> Option<String> {
        if self.has_drift() {
            Some(format!(
                "{}: missing {}",
                self.file.path,
                self.missing_properties.join(", ")
            ))
        } else {
            None
        }
    }
}

/// Validation counts over the whole result set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub issues: Vec<String>,
}

impl ValidationSummary {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validation detail for one entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeValidation {
    pub entity_type: String,
    pub total: usize,
    pub valid: usize,
    pub with_issues: usize,
    pub issues: Vec<String>,
}

/// Run one full matching pass without touching any held state
///
/// Files without metadata (absent or empty) are skipped. Each remaining file
/// is tested against `schemas` in order and assigned to the first match.
/// Only collaborator failures are errors.
pub async fn scan_entities(
    files: &[FileRef],
    source: &dyn MetadataSource,
    matcher: &SchemaMatcher,
    schemas: &[EntitySchema],
) -> Result<Vec<EntityInstance>> {
    let mut instances = Vec::new();

    for file in files {
        let metadata = match source.metadata(file).await? {
            Some(metadata) if !metadata.is_empty() => metadata,
            _ => continue,
        };

        let Some(schema) = matcher.first_match(file, &metadata, schemas)? else {
            continue;
        };

        let missing_properties = missing_fields(&metadata, schema);
        debug!(
            file = %file,
            entity_type = %schema.name,
            missing = missing_properties.len(),
            "matched entity"
        );

        instances.push(EntityInstance {
            file: file.clone(),
            entity_type: schema.name.clone(),
            properties: metadata,
            missing_properties,
        });
    }

    Ok(instances)
}

/// Clears the in-progress flag when a scan ends, including on error
struct ScanGuard<'a>(&'a AtomicBool);

impl<'a> ScanGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AtlasError::ScanInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds the schema set and the latest scan results, and answers queries over them
pub struct EntityScanner {
    matcher: SchemaMatcher,
    schemas: RwLock<Arc<Vec<EntitySchema>>>,
    instances: RwLock<Arc<Vec<EntityInstance>>>,
    scanning: AtomicBool,
}

impl EntityScanner {
    /// Create a scanner with an ordered schema set and no results
    pub fn new(matcher: SchemaMatcher, schemas: Vec<EntitySchema>) -> Self {
        Self {
            matcher,
            schemas: RwLock::new(Arc::new(schemas)),
            instances: RwLock::new(Arc::new(Vec::new())),
            scanning: AtomicBool::new(false),
        }
    }

    /// Copy of the current schema set, in priority order
    pub fn schemas(&self) -> Vec<EntitySchema> {
        self.schemas.read().to_vec()
    }

    /// Replace the schema set used by subsequent scans
    ///
    /// A scan already running keeps the snapshot it started with.
    pub fn set_schemas(&self, schemas: Vec<EntitySchema>) {
        *self.schemas.write() = Arc::new(schemas);
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::Acquire)
    }

    /// Scan `files` and replace the held result set
    ///
    /// Returns a copy of the new results. On error the previous result set is kept.
    pub async fn scan(
        &self,
        files: &[FileRef],
        source: &dyn MetadataSource,
    ) -> Result<Vec<EntityInstance>> {
        let _guard = ScanGuard::acquire(&self.scanning)?;
        let schemas = Arc::clone(&self.schemas.read());
        let started = Instant::now();

        let instances = scan_entities(files, source, &self.matcher, &schemas).await?;

        let drift = instances.iter().filter(|i| i.has_drift()).count();
        info!(
            files = files.len(),
            schemas = schemas.len(),
            entities = instances.len(),
            drift,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "entity scan complete"
        );

        *self.instances.write() = Arc::new(instances.clone());
        Ok(instances)
    }

    fn snapshot(&self) -> Arc<Vec<EntityInstance>> {
        Arc::clone(&self.instances.read())
    }

    // ===== Queries =====

    /// All instances from the last completed scan
    pub fn instances(&self) -> Vec<EntityInstance> {
        self.snapshot().to_vec()
    }

    /// Instances of one entity type
    pub fn instances_of(&self, entity_type: &str) -> Vec<EntityInstance> {
        self.snapshot()
            .iter()
            .filter(|i| i.entity_type == entity_type)
            .cloned()
            .collect()
    }

    /// Instances grouped by entity type, in order of first appearance
    pub fn grouped_by_type(&self) -> IndexMap<String, Vec<EntityInstance>> {
        let mut groups: IndexMap<String, Vec<EntityInstance>> = IndexMap::new();
        for instance in self.snapshot().iter() {
            groups
                .entry(instance.entity_type.clone())
                .or_default()
                .push(instance.clone());
        }
        groups
    }

    /// Instances missing at least one required field
    pub fn drift(&self) -> Vec<EntityInstance> {
        self.snapshot()
            .iter()
            .filter(|i| i.has_drift())
            .cloned()
            .collect()
    }

    /// Counts and issue lines over all instances
    pub fn validation_summary(&self) -> ValidationSummary {
        let snapshot = self.snapshot();
        let issues: Vec<String> = snapshot.iter().filter_map(EntityInstance::issue).collect();
        ValidationSummary {
            total: snapshot.len(),
            valid: snapshot.len() - issues.len(),
            issues,
        }
    }

    /// Validation detail for one entity type
    pub fn validate_type(&self, entity_type: &str) -> Result<TypeValidation> {
        self.require_type(entity_type)?;

        let instances = self.instances_of(entity_type);
        let issues: Vec<String> = instances.iter().filter_map(EntityInstance::issue).collect();
        Ok(TypeValidation {
            entity_type: entity_type.to_string(),
            total: instances.len(),
            valid: instances.len() - issues.len(),
            with_issues: issues.len(),
            issues,
        })
    }

    /// Schema names in priority order
    pub fn entity_type_names(&self) -> Vec<String> {
        self.schemas.read().iter().map(|s| s.name.clone()).collect()
    }

    pub fn has_entity_type(&self, entity_type: &str) -> bool {
        self.schemas.read().iter().any(|s| s.name == entity_type)
    }

    /// Number of instances of one entity type
    pub fn count_of(&self, entity_type: &str) -> usize {
        self.snapshot()
            .iter()
            .filter(|i| i.entity_type == entity_type)
            .count()
    }

    /// Instance count for every schema, zero included, in priority order
    pub fn type_counts(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = self
            .entity_type_names()
            .into_iter()
            .map(|name| (name, 0))
            .collect();
        for instance in self.snapshot().iter() {
            *counts.entry(instance.entity_type.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Scaffolding metadata for a new instance of `entity_type`
    pub fn template(&self, entity_type: &str) -> Result<PropertyMap> {
        let schemas = Arc::clone(&self.schemas.read());
        schemas
            .iter()
            .find(|s| s.name == entity_type)
            .map(EntityTemplate::for_schema)
            .ok_or_else(|| AtlasError::UnknownEntityType(entity_type.to_string()))
    }

    fn require_type(&self, entity_type: &str) -> Result<()> {
        if self.has_entity_type(entity_type) {
            Ok(())
        } else {
            Err(AtlasError::UnknownEntityType(entity_type.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyValue;
    use crate::resolver::NoopResolver;
    use crate::schema::{MatchCriteria, PropertyDefinition, PropertyKind};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Metadata source over a fixed path → metadata table
    struct MapSource(HashMap<String, Option<PropertyMap>>);

    #[async_trait]
    impl MetadataSource for MapSource {
        async fn metadata(&self, file: &FileRef) -> Result<Option<PropertyMap>> {
            Ok(self.0.get(&file.path).cloned().flatten())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MetadataSource for FailingSource {
        async fn metadata(&self, file: &FileRef) -> Result<Option<PropertyMap>> {
            Err(AtlasError::metadata(file.path.clone(), "disk gone"))
        }
    }

    fn meta(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), PropertyValue::from(*v)))
            .collect()
    }

    fn schemas() -> Vec<EntitySchema> {
        vec![
            EntitySchema::new("Person")
                .with_property("email", PropertyDefinition::new(PropertyKind::String).required())
                .with_criteria(
                    MatchCriteria::new()
                        .in_folder("people")
                        .require(["name"]),
                ),
            EntitySchema::new("Generic").with_criteria(MatchCriteria::new().require(["name"])),
        ]
    }

    fn fixture() -> (Vec<FileRef>, MapSource) {
        let files = vec![
            FileRef::new("people/ada.md"),
            FileRef::new("people/bob.md"),
            FileRef::new("misc/c.md"),
            FileRef::new("misc/empty.md"),
            FileRef::new("misc/none.md"),
        ];
        let source = MapSource(HashMap::from([
            (
                "people/ada.md".to_string(),
                Some(meta(&[("name", "Ada"), ("email", "ada@example.com")])),
            ),
            ("people/bob.md".to_string(), Some(meta(&[("name", "Bob")]))),
            ("misc/c.md".to_string(), Some(meta(&[("name", "C")]))),
            ("misc/empty.md".to_string(), Some(PropertyMap::new())),
            ("misc/none.md".to_string(), None),
        ]));
        (files, source)
    }

    fn scanner() -> EntityScanner {
        EntityScanner::new(SchemaMatcher::new(Arc::new(NoopResolver)), schemas())
    }

    #[tokio::test]
    async fn test_scan_assigns_first_match_and_skips_empty() {
        let (files, source) = fixture();
        let scanner = scanner();

        let instances = scanner.scan(&files, &source).await.unwrap();
        let assigned: Vec<(&str, &str)> = instances
            .iter()
            .map(|i| (i.file.path.as_str(), i.entity_type.as_str()))
            .collect();

        assert_eq!(
            assigned,
            vec![
                ("people/ada.md", "Person"),
                ("people/bob.md", "Person"),
                ("misc/c.md", "Generic"),
            ]
        );
    }

    #[tokio::test]
    async fn test_instances_carry_full_metadata() {
        let (files, source) = fixture();
        let scanner = scanner();
        scanner.scan(&files, &source).await.unwrap();

        let ada = &scanner.instances_of("Person")[0];
        assert_eq!(ada.properties.len(), 2);
        assert_eq!(ada.properties["email"], PropertyValue::from("ada@example.com"));
    }

    #[tokio::test]
    async fn test_instance_json_uses_file_ref_key() {
        let (files, source) = fixture();
        let scanner = scanner();
        let instances = scanner.scan(&files, &source).await.unwrap();

        let json = serde_json::to_value(&instances[1]).unwrap();
        assert_eq!(json["fileRef"]["path"], "people/bob.md");
        assert!(json.get("file").is_none());
        assert_eq!(json["entityType"], "Person");
        assert_eq!(json["missingProperties"], serde_json::json!(["email"]));

        let back: EntityInstance = serde_json::from_value(json).unwrap();
        assert_eq!(back, instances[1]);
    }

    #[tokio::test]
    async fn test_validation_views() {
        let (files, source) = fixture();
        let scanner = scanner();
        scanner.scan(&files, &source).await.unwrap();

        let summary = scanner.validation_summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.issues, vec!["people/bob.md: missing email"]);
        assert!(!summary.is_clean());

        let drift = scanner.drift();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].file.path, "people/bob.md");

        let person = scanner.validate_type("Person").unwrap();
        assert_eq!(person.total, 2);
        assert_eq!(person.valid, 1);
        assert_eq!(person.with_issues, 1);

        let generic = scanner.validate_type("Generic").unwrap();
        assert_eq!(generic.total, 1);
        assert!(generic.issues.is_empty());

        assert_eq!(
            scanner.validate_type("Ghost").unwrap_err(),
            AtlasError::UnknownEntityType("Ghost".into())
        );
    }

    #[tokio::test]
    async fn test_grouping_and_counts() {
        let (files, source) = fixture();
        let scanner = scanner();
        scanner.scan(&files, &source).await.unwrap();

        let groups = scanner.grouped_by_type();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Person", "Generic"]);
        assert_eq!(groups["Person"].len(), 2);

        assert_eq!(scanner.count_of("Person"), 2);
        assert_eq!(scanner.count_of("Ghost"), 0);

        scanner.set_schemas({
            let mut s = schemas();
            s.push(EntitySchema::new("Unused"));
            s
        });
        let counts = scanner.type_counts();
        assert_eq!(counts["Person"], 2);
        assert_eq!(counts["Generic"], 1);
        assert_eq!(counts["Unused"], 0);
    }

    #[tokio::test]
    async fn test_type_names() {
        let scanner = scanner();
        assert_eq!(scanner.entity_type_names(), vec!["Person", "Generic"]);
        assert!(scanner.has_entity_type("Person"));
        assert!(!scanner.has_entity_type("person"));
    }

    #[tokio::test]
    async fn test_rescan_replaces_results() {
        let (files, source) = fixture();
        let scanner = scanner();
        scanner.scan(&files, &source).await.unwrap();
        assert_eq!(scanner.instances().len(), 3);

        scanner.scan(&files[2..], &source).await.unwrap();
        let instances = scanner.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].file.path, "misc/c.md");
    }

    #[tokio::test]
    async fn test_failed_scan_keeps_previous_results() {
        let (files, source) = fixture();
        let scanner = scanner();
        scanner.scan(&files, &source).await.unwrap();

        let err = scanner.scan(&files, &FailingSource).await.unwrap_err();
        assert!(matches!(err, AtlasError::Metadata { .. }));
        assert_eq!(scanner.instances().len(), 3);
        assert!(!scanner.is_scanning());
    }

    #[tokio::test]
    async fn test_returned_copies_do_not_alias_state() {
        let (files, source) = fixture();
        let scanner = scanner();
        scanner.scan(&files, &source).await.unwrap();

        let mut copy = scanner.instances();
        copy[0].missing_properties.push("tampered".into());
        copy.clear();

        let mut schemas = scanner.schemas();
        schemas.clear();

        assert_eq!(scanner.instances().len(), 3);
        assert!(scanner.instances()[0].missing_properties.is_empty());
        assert_eq!(scanner.schemas().len(), 2);
    }

    #[test]
    fn test_scan_guard_rejects_reentry() {
        let flag = AtomicBool::new(false);
        let guard = ScanGuard::acquire(&flag).unwrap();
        assert!(matches!(
            ScanGuard::acquire(&flag),
            Err(AtlasError::ScanInProgress)
        ));
        drop(guard);
        assert!(ScanGuard::acquire(&flag).is_ok());
    }

    #[tokio::test]
    async fn test_template_lookup() {
        let scanner = scanner();
        let template = scanner.template("Person").unwrap();
        assert!(template.contains_key("email"));
        assert!(template.contains_key("name"));
        assert!(matches!(
            scanner.template("Ghost"),
            Err(AtlasError::UnknownEntityType(_))
        ));
    }
}
