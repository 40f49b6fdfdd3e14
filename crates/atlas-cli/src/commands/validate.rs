use super::AtlasContext;
use crate::cli::OutputFormat;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

/// Exit code reported when any instance is missing required fields
const ISSUES_FOUND: u8 = 1;

pub async fn execute(context: &AtlasContext, entity_type: Option<String>) -> Result<ExitCode> {
    let scanner = context.scan().await?;

    let has_issues = match entity_type {
        Some(name) => {
            let detail = scanner.validate_type(&name)?;
            match context.format {
                OutputFormat::Json => output::print_json(&detail)?,
                OutputFormat::Table => {
                    println!(
                        "{}: {} entities, {} valid, {} with issues",
                        detail.entity_type.bold(),
                        detail.total,
                        detail.valid,
                        detail.with_issues
                    );
                    for issue in &detail.issues {
                        println!("  {}", issue);
                    }
                }
            }
            detail.with_issues > 0
        }
        None => {
            let summary = scanner.validation_summary();
            match context.format {
                OutputFormat::Json => output::print_json(&summary)?,
                OutputFormat::Table => {
                    for line in output::summary_lines(&summary) {
                        println!("{}", line);
                    }
                }
            }
            !summary.is_clean()
        }
    };

    if has_issues {
        Ok(ExitCode::from(ISSUES_FOUND))
    } else {
        if context.format == OutputFormat::Table {
            println!("{}", "All entities have their required fields".green());
        }
        Ok(ExitCode::SUCCESS)
    }
}
