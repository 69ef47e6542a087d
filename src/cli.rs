//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// modulemd - Validate and format module metadata documents
#[derive(Parser, Debug)]
#[command(name = "modulemd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        env = "MODULEMD_LOG",
        default_value = "warn"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse module metadata files and report the documents they contain
    Validate(commands::validate::ValidateArgs),

    /// Re-emit a module metadata file in canonical form
    Fmt(commands::fmt::FmtArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Fmt(args) => commands::fmt::execute(args),
        }
    }
}
