//! Symbolic reference normalization
//!
//! Frontmatter refers to other notes with Obsidian-style wikilinks:
//! - Basic: `[[note]]`
//! - With folder path: `[[atlas/entities/person]]`
//! - With extension: `[[person.md]]`
//! - With display text: `[[atlas/entities/person.md|Person]]`
//!
//! Both functions here are total: every string is either a reference or
//! passes through untouched.

use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[([^\]]+)\]\]$").expect("reference regex"));

/// True when `s`, after trimming, is exactly one `[[...]]` reference
pub fn is_symbolic_reference(s: &str) -> bool {
    REFERENCE_REGEX.is_match(s.trim())
}

/// Extract the link target from a symbolic reference
///
/// Returns the text inside the brackets up to (not including) an optional
/// `|display` suffix, trimmed. Non-references are returned unchanged.
pub fn extract_target(s: &str) -> &str {
    match REFERENCE_REGEX.captures(s.trim()).and_then(|cap| cap.get(1)) {
        Some(inner) => {
            let inner = inner.as_str();
            let target = inner.split_once('|').map_or(inner, |(target, _)| target);
            target.trim()
        }
        None => s,
    }
}
