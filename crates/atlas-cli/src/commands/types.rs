use super::AtlasContext;
use crate::cli::OutputFormat;
use crate::output;
use anyhow::Result;
use std::process::ExitCode;

pub async fn execute(context: &AtlasContext) -> Result<ExitCode> {
    let scanner = context.scan().await?;
    let counts = scanner.type_counts();

    match context.format {
        OutputFormat::Json => output::print_json(&counts)?,
        OutputFormat::Table => println!("{}", output::types_table(&scanner.schemas(), &counts)),
    }

    Ok(ExitCode::SUCCESS)
}
