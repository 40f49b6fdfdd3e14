//! Atlas entity engine
//!
//! Discovers typed entities among frontmatter-annotated notes and reports
//! which required fields they lack. The engine is host-agnostic: it consumes
//! file handles, a metadata lookup and a link resolver, and never touches the
//! filesystem itself.
//!
//! ## Components (leaf first)
//!
//! - [`link`] - parses `[[target|display]]` references
//! - [`compare`] - link-aware, case-insensitive value comparison
//! - [`matcher`] - decides whether a file satisfies a schema's criteria
//! - [`missing`] - computes required fields absent from a match
//! - [`scanner`] - first-match-wins scan over all files and schemas, plus query views
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atlas_core::{EntityScanner, SchemaMatcher, NoopResolver, FileRef, MetadataSource};
//! use std::sync::Arc;
//!
//! # async fn example(source: &dyn MetadataSource, files: Vec<FileRef>) -> atlas_core::Result<()> {
//! let matcher = SchemaMatcher::new(Arc::new(NoopResolver));
//! let scanner = EntityScanner::new(matcher, Vec::new());
//! scanner.scan(&files, source).await?;
//! println!("{} issues", scanner.validation_summary().issues.len());
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod error;
pub mod link;
pub mod matcher;
pub mod missing;
pub mod properties;
pub mod resolver;
pub mod scanner;
pub mod schema;
pub mod template;

pub use compare::{equivalent, ValueComparator};
pub use error::{AtlasError, Result};
pub use link::{extract_target, is_symbolic_reference};
pub use matcher::{has_tag_containing, SchemaMatcher, TAGS_KEY};
pub use missing::missing_fields;
pub use properties::{property_map_from_json, property_map_from_yaml, PropertyMap, PropertyValue};
pub use resolver::{FileRef, LinkResolver, MetadataSource, NoopResolver};
pub use scanner::{scan_entities, EntityInstance, EntityScanner, TypeValidation, ValidationSummary};
pub use schema::{EntitySchema, MatchCriteria, PropertyDefinition, PropertyKind};
pub use template::{render_frontmatter, EntityTemplate};
