use super::AtlasContext;
use crate::cli::OutputFormat;
use crate::output;
use anyhow::Result;
use std::process::ExitCode;

pub async fn execute(context: &AtlasContext) -> Result<ExitCode> {
    let scanner = context.scan().await?;
    let drift = scanner.drift();

    match context.format {
        OutputFormat::Json => output::print_json(&drift)?,
        OutputFormat::Table if drift.is_empty() => println!("No drift"),
        OutputFormat::Table => println!("{}", output::instances_table(&drift)),
    }

    Ok(ExitCode::SUCCESS)
}
