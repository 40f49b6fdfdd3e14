//! Schema matching
//!
//! Decides whether one file "is" an instance of one schema. Criteria are
//! evaluated cheapest-first and short-circuit on the first failure:
//!
//! 1. required properties exist (key presence only)
//! 2. folder path prefix
//! 3. tag pattern (substring of any tag)
//! 4. name pattern (substring of the basename)
//! 5. every expected property value, via [`ValueComparator`]
//!
//! [`SchemaMatcher::first_match`] applies the priority rule: schemas are tried
//! in sequence order and the first hit wins.

use crate::compare::ValueComparator;
use crate::error::Result;
use crate::properties::{PropertyMap, PropertyValue};
use crate::resolver::{FileRef, LinkResolver};
use crate::schema::{EntitySchema, MatchCriteria};
use std::sync::Arc;
use tracing::trace;

/// Metadata key holding a note's tags
pub const TAGS_KEY: &str = "tags";

/// Matches files against schema criteria
#[derive(Clone)]
pub struct SchemaMatcher {
    resolver: Arc<dyn LinkResolver>,
}

impl SchemaMatcher {
    /// Create a matcher that resolves links through `resolver`
    pub fn new(resolver: Arc<dyn LinkResolver>) -> Self {
        Self { resolver }
    }

    /// Whether `file` with `metadata` satisfies every criterion of `schema`
    pub fn matches(
        &self,
        file: &FileRef,
        metadata: &PropertyMap,
        schema: &EntitySchema,
    ) -> Result<bool> {
        let criteria = &schema.match_criteria;

        if let Some(missing) = criteria
            .required_properties
            .iter()
            .find(|key| !metadata.contains_key(key.as_str()))
        {
            trace!(file = %file, schema = %schema.name, key = %missing, "required property absent");
            return Ok(false);
        }

        if let Some(prefix) = &criteria.folder_path {
            if !file.path.starts_with(prefix.as_str()) {
                trace!(file = %file, schema = %schema.name, prefix = %prefix, "outside folder");
                return Ok(false);
            }
        }

        if let Some(pattern) = &criteria.tag_pattern {
            if !has_tag_containing(metadata, pattern) {
                trace!(file = %file, schema = %schema.name, pattern = %pattern, "no matching tag");
                return Ok(false);
            }
        }

        if let Some(pattern) = &criteria.name_pattern {
            if !file.basename.contains(pattern.as_str()) {
                trace!(file = %file, schema = %schema.name, pattern = %pattern, "name mismatch");
                return Ok(false);
            }
        }

        self.property_values_match(file, metadata, criteria, &schema.name)
    }

    /// First schema in `schemas` that `file` matches, if any
    ///
    /// Later schemas are not evaluated once one matches.
    pub fn first_match<'s>(
        &self,
        file: &FileRef,
        metadata: &PropertyMap,
        schemas: &'s [EntitySchema],
    ) -> Result<Option<&'s EntitySchema>> {
        for schema in schemas {
            if self.matches(file, metadata, schema)? {
                return Ok(Some(schema));
            }
        }
        Ok(None)
    }

    fn property_values_match(
        &self,
        file: &FileRef,
        metadata: &PropertyMap,
        criteria: &MatchCriteria,
        schema_name: &str,
    ) -> Result<bool> {
        if criteria.property_values.is_empty() {
            return Ok(true);
        }

        let comparator = ValueComparator::new(self.resolver.as_ref(), file);
        for (key, expected) in &criteria.property_values {
            if !comparator.compare(metadata.get(key), Some(expected))? {
                trace!(file = %file, schema = %schema_name, key = %key, "property value mismatch");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Whether any tag of the note contains `pattern`
///
/// `tags` may be a single scalar or a list. Scalars are compared by their
/// display form; null and structured tags never match.
pub fn has_tag_containing(metadata: &PropertyMap, pattern: &str) -> bool {
    let tag_matches = |tag: &PropertyValue| tag.is_scalar() && tag.to_string().contains(pattern);

    match metadata.get(TAGS_KEY) {
        Some(PropertyValue::List(tags)) => tags.iter().any(tag_matches),
        Some(tag) => tag_matches(tag),
        None => false,
    }
}
