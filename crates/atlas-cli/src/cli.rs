use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages (default for verbose)
    Debug,
    /// Trace-level messages, including every match decision
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "atlas")]
#[command(about = "atlas - find typed entities in a vault of notes and report missing fields")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory
    #[arg(short = 'd', long, global = true, default_value = ".")]
    pub vault: PathBuf,

    /// Settings file (defaults to <vault>/.atlas/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Schema document (overrides the settings file)
    #[arg(short = 's', long, global = true)]
    pub schemas: Option<PathBuf>,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses RUST_LOG, then the settings file
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl Cli {
    /// Log level requested on the command line, if any
    pub fn requested_log_level(&self) -> Option<LogLevel> {
        match self.log_level {
            Some(level) => Some(level),
            None if self.verbose => Some(LogLevel::Debug),
            None => None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List entity instances found in the vault
    Scan {
        /// Only show instances of this type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        entity_type: Option<String>,
    },

    /// Report instances missing required fields (exit code 1 on issues)
    Validate {
        /// Detail for a single type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        entity_type: Option<String>,
    },

    /// List instances with missing fields
    Drift,

    /// List entity types with instance counts
    Types,

    /// Print starting frontmatter for a new instance
    Template {
        /// Entity type name
        #[arg(value_name = "TYPE")]
        entity_type: String,
    },

    /// Manage the schema document
    #[command(subcommand)]
    Schemas(SchemaCommands),
}

#[derive(Debug, Subcommand)]
pub enum SchemaCommands {
    /// Check the schema document for structural problems
    Check,

    /// Write the built-in schemas to the schema document
    Init {
        /// Replace an existing document
        #[arg(long)]
        force: bool,
    },
}
