//! YAML frontmatter extraction
//!
//! A frontmatter block starts on the first line with `---` and ends at the
//! next line that is exactly `---` or `...`.

use crate::error::VaultResult;
use atlas_core::{property_map_from_yaml, PropertyMap};
use serde_yaml::Value;

const OPEN: &str = "---";
const CLOSERS: [&str; 2] = ["---", "..."];

/// Raw YAML text of the frontmatter block, without delimiters
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end_matches(['\r', '\n']) != OPEN {
        return None;
    }

    let start = first.len();
    let mut end = start;
    for line in lines {
        if CLOSERS.contains(&line.trim_end_matches(['\r', '\n'])) {
            return Some(&content[start..end]);
        }
        end += line.len();
    }

    None
}

/// Parse the frontmatter block of a note into metadata
///
/// Returns `Ok(None)` when there is no block or the block is not a mapping.
pub fn parse_frontmatter(content: &str) -> VaultResult<Option<PropertyMap>> {
    let Some(block) = extract_frontmatter(content) else {
        return Ok(None);
    };

    match serde_yaml::from_str::<Value>(block)? {
        Value::Mapping(mapping) => Ok(Some(property_map_from_yaml(mapping))),
        _ => Ok(None),
    }
}
