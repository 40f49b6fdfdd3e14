//! # Atlas Configuration
//!
//! Settings discovery for a vault and storage of the schema document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atlas_config::{ConfigLoader, load_schemas_or_default};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let vault = Path::new("/path/to/vault");
//! let loaded = ConfigLoader::load(vault, None)?;
//! let schemas = load_schemas_or_default(&loaded.config.schema_path(vault)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

mod defaults;
mod error;
mod schema_file;
mod settings;

pub use defaults::default_schemas;
pub use error::{ConfigError, ConfigResult, SchemaIssue};
pub use schema_file::{
    load_schemas, load_schemas_or_default, parse_schemas, save_schemas, validate_schema_document,
};
pub use settings::{
    validate_config, AtlasConfig, ConfigLoader, ConfigSource, LoadedConfig, LoggingConfig,
    SchemaConfig, VaultConfig, ATLAS_DIR, CONFIG_FILE, SCHEMAS_FILE,
};
