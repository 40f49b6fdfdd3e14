use atlas_cli::cli::Cli;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

/// Exit code for failures other than validation issues
const FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match atlas_cli::run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(FAILURE)
        }
    }
}
