//! Filesystem host for the Atlas entity engine
//!
//! Walks a vault of Markdown notes, parses their YAML frontmatter and exposes
//! the result through the engine's [`MetadataSource`](atlas_core::MetadataSource)
//! and [`LinkResolver`](atlas_core::LinkResolver) traits.

pub mod error;
pub mod frontmatter;
pub mod index;
pub mod walker;

pub use error::{VaultError, VaultResult};
pub use frontmatter::{extract_frontmatter, parse_frontmatter};
pub use index::VaultIndex;
pub use walker::discover_files;
