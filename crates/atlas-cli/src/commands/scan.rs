use super::AtlasContext;
use crate::cli::OutputFormat;
use crate::output;
use anyhow::Result;
use atlas_core::AtlasError;
use std::process::ExitCode;

pub async fn execute(context: &AtlasContext, entity_type: Option<String>) -> Result<ExitCode> {
    let scanner = context.scan().await?;

    let instances = match entity_type.as_deref() {
        Some(name) if !scanner.has_entity_type(name) => {
            return Err(AtlasError::UnknownEntityType(name.to_string()).into());
        }
        Some(name) => scanner.instances_of(name),
        None => scanner.instances(),
    };

    match context.format {
        OutputFormat::Json => output::print_json(&instances)?,
        OutputFormat::Table => {
            if instances.is_empty() {
                println!("No entities found");
            } else {
                println!("{}", output::instances_table(&instances));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
