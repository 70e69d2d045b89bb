//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// Apply configured method transformers to method tokens
#[derive(Parser, Debug)]
#[command(name = "method-transform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "METHOD_TRANSFORM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        default_value = "info",
        env = "METHOD_TRANSFORM_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "METHOD_TRANSFORM_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Transform method tokens read from a file
    Apply {
        /// Binary name of the instrumented type
        #[arg(long)]
        owner: String,

        /// YAML or JSON list of method tokens
        #[arg(required = true)]
        input: PathBuf,

        /// Output format (overrides configuration)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the configured transformer
    Show,

    /// Validate the configuration
    Check,
}
