use super::AtlasContext;
use crate::cli::{OutputFormat, SchemaCommands};
use crate::output;
use anyhow::{bail, Context, Result};
use atlas_config::{default_schemas, save_schemas, validate_schema_document};
use colored::Colorize;
use serde_json::json;
use std::process::ExitCode;

pub async fn execute(context: &AtlasContext, command: SchemaCommands) -> Result<ExitCode> {
    match command {
        SchemaCommands::Check => check(context).await,
        SchemaCommands::Init { force } => init(context, force).await,
    }
}

async fn check(context: &AtlasContext) -> Result<ExitCode> {
    let path = &context.schema_path;
    if !path.exists() {
        match context.format {
            OutputFormat::Json => output::print_json(&json!({
                "path": path.display().to_string(),
                "exists": false,
                "issues": [],
            }))?,
            OutputFormat::Table => println!(
                "No schema document at {}; built-in schemas are in use",
                path.display()
            ),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let issues = validate_schema_document(&document);

    match context.format {
        OutputFormat::Json => {
            let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
            output::print_json(&json!({
                "path": path.display().to_string(),
                "exists": true,
                "issues": issues,
            }))?
        }
        OutputFormat::Table if issues.is_empty() => {
            println!("{} {}", "ok".green(), path.display());
        }
        OutputFormat::Table => {
            println!("{} {}", "invalid".red(), path.display());
            for issue in &issues {
                println!("  {}", issue);
            }
        }
    }

    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

async fn init(context: &AtlasContext, force: bool) -> Result<ExitCode> {
    let path = &context.schema_path;
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    let schemas = default_schemas();
    save_schemas(path, &schemas).await?;
    println!("Wrote {} schemas to {}", schemas.len(), path.display());
    Ok(ExitCode::SUCCESS)
}
