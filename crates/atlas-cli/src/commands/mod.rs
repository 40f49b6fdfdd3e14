//! Command implementations
//!
//! Every entity command loads the vault, runs one full scan and renders a
//! view of the result. `schemas` works on the schema document alone.

pub mod drift;
pub mod schemas;
pub mod scan;
pub mod template;
pub mod types;
pub mod validate;

use crate::cli::{Cli, Commands, OutputFormat};
use anyhow::{Context, Result};
use atlas_config::{load_schemas_or_default, AtlasConfig};
use atlas_core::{EntityScanner, SchemaMatcher};
use atlas_vault::VaultIndex;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

/// Resolved inputs shared by all commands
#[derive(Debug, Clone)]
pub struct AtlasContext {
    pub vault_root: PathBuf,
    pub config: AtlasConfig,
    pub schema_path: PathBuf,
    pub format: OutputFormat,
}

impl AtlasContext {
    pub fn new(cli: &Cli, config: AtlasConfig) -> Self {
        let schema_path = cli
            .schemas
            .clone()
            .unwrap_or_else(|| config.schema_path(&cli.vault));
        Self {
            vault_root: cli.vault.clone(),
            config,
            schema_path,
            format: cli.format,
        }
    }

    /// Load schemas and the vault, then run a full scan
    pub async fn scan(&self) -> Result<EntityScanner> {
        let schemas = load_schemas_or_default(&self.schema_path)
            .await
            .with_context(|| format!("loading schemas from {}", self.schema_path.display()))?;
        debug!(count = schemas.len(), "schemas ready");

        let index = Arc::new(
            VaultIndex::load(&self.vault_root, &self.config.vault)
                .await
                .with_context(|| format!("reading vault {}", self.vault_root.display()))?,
        );

        let scanner = EntityScanner::new(SchemaMatcher::new(index.clone()), schemas);
        scanner.scan(index.files(), index.as_ref()).await?;
        Ok(scanner)
    }
}

/// Run the parsed command
pub async fn execute(cli: Cli, config: AtlasConfig) -> Result<ExitCode> {
    let context = AtlasContext::new(&cli, config);

    match cli.command {
        Commands::Scan { entity_type } => scan::execute(&context, entity_type).await,
        Commands::Validate { entity_type } => validate::execute(&context, entity_type).await,
        Commands::Drift => drift::execute(&context).await,
        Commands::Types => types::execute(&context).await,
        Commands::Template { entity_type } => template::execute(&context, &entity_type).await,
        Commands::Schemas(command) => schemas::execute(&context, command).await,
    }
}
