use super::AtlasContext;
use crate::cli::OutputFormat;
use crate::output;
use anyhow::Result;
use atlas_core::render_frontmatter;
use std::process::ExitCode;

pub async fn execute(context: &AtlasContext, entity_type: &str) -> Result<ExitCode> {
    let scanner = context.scan().await?;
    let template = scanner.template(entity_type)?;

    match context.format {
        OutputFormat::Json => output::print_json(&template)?,
        OutputFormat::Table => print!("{}", render_frontmatter(&template)?),
    }

    Ok(ExitCode::SUCCESS)
}
