//! # modulemd CLI
//!
//! Binary entry point for the `modulemd` command-line tool. It parses the
//! arguments with `clap` and hands off to the matching subcommand; all of the
//! document handling lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
