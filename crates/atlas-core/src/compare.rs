//! Value comparison between note metadata and schema expectations
//!
//! Comparison order matters and is fixed:
//!
//! 1. An expected list is an OR over its elements (empty list never matches)
//! 2. Absent and `Null` only equal themselves (`Null` never equals absent)
//! 3. String pairs: link-aware when either side is a `[[reference]]`,
//!    otherwise case-insensitive equality (no trimming)
//! 4. Everything else: strict equality without coercion
//!
//! Checking the list before nulls lets an expected `[null, "x"]` work per element,
//! and checking links before plain strings lets `"person"` equal
//! `"[[atlas/entities/person]]"` when both resolve to the same note.

use crate::error::Result;
use crate::link::{extract_target, is_symbolic_reference};
use crate::properties::PropertyValue;
use crate::resolver::{FileRef, LinkResolver};
use tracing::trace;

/// Compares metadata values, resolving links relative to one source file
pub struct ValueComparator<'a> {
    resolver: &'a dyn LinkResolver,
    source: &'a FileRef,
}

impl<'a> ValueComparator<'a> {
    /// Create a comparator for values read from `source`
    pub fn new(resolver: &'a dyn LinkResolver, source: &'a FileRef) -> Self {
        Self { resolver, source }
    }

    /// Compare an actual metadata value against an expected schema value
    ///
    /// `None` on either side means the key is absent. Only resolver failures
    /// produce an error; every type mismatch is simply `Ok(false)`.
    pub fn compare(
        &self,
        actual: Option<&PropertyValue>,
        expected: Option<&PropertyValue>,
    ) -> Result<bool> {
        if let Some(PropertyValue::List(options)) = expected {
            for option in options {
                if self.compare(actual, Some(option))? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        let (actual, expected) = match (actual, expected) {
            (None, None) => return Ok(true),
            (None, Some(_)) | (Some(_), None) => return Ok(false),
            (Some(a), Some(e)) => (a, e),
        };

        match (actual, expected) {
            (PropertyValue::Null, PropertyValue::Null) => Ok(true),
            (PropertyValue::Null, _) | (_, PropertyValue::Null) => Ok(false),
            (PropertyValue::String(a), PropertyValue::String(e)) => {
                if is_symbolic_reference(a) || is_symbolic_reference(e) {
                    self.compare_links(a, e)
                } else {
                    Ok(a.to_lowercase() == e.to_lowercase())
                }
            }
            (PropertyValue::Bool(a), PropertyValue::Bool(e)) => Ok(a == e),
            (PropertyValue::Number(a), PropertyValue::Number(e)) => Ok(a == e),
            // Structured values are never identical across metadata and config
            _ => Ok(false),
        }
    }

    /// Compare two strings of which at least one is a symbolic reference
    pub fn compare_links(&self, actual: &str, expected: &str) -> Result<bool> {
        let actual_target = extract_target(actual);
        let expected_target = extract_target(expected);

        let actual_file = self.resolver.resolve(actual_target, self.source)?;
        let expected_file = self.resolver.resolve(expected_target, self.source)?;

        let equal = match (&actual_file, &expected_file) {
            (Some(a), Some(e)) => a.path == e.path,
            (Some(file), None) => equivalent(file, expected_target),
            (None, Some(file)) => equivalent(file, actual_target),
            (None, None) => actual_target.to_lowercase() == expected_target.to_lowercase(),
        };

        trace!(
            source = %self.source,
            actual = actual_target,
            expected = expected_target,
            actual_resolved = actual_file.is_some(),
            expected_resolved = expected_file.is_some(),
            equal,
            "compared links"
        );

        Ok(equal)
    }
}

/// Whether `candidate` names `file`
///
/// Case-insensitive match against the full path, the path without its
/// extension, the basename, or the file name. Falls back to a substring test
/// on the full path so partial paths like `entities/person` still match.
/// The substring fallback over-matches short candidates (`"a"` matches any
/// path containing an `a`); callers relying on it accept that.
pub fn equivalent(file: &FileRef, candidate: &str) -> bool {
    let candidate = extract_target(candidate).to_lowercase();
    let path = file.path.to_lowercase();

    if path == candidate
        || file.basename.to_lowercase() == candidate
        || file.name().to_lowercase() == candidate
    {
        return true;
    }

    if !file.extension.is_empty()
        && path == format!("{}.{}", candidate, file.extension.to_lowercase())
    {
        return true;
    }

    path.contains(&candidate)
}
