//! # Fmt Command Implementation
//!
//! Implements `modulemd fmt`: parse a module metadata file and write it back
//! in canonical form (sorted sets, fixed key order, folded descriptions).

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::io::Write;
use std::path::PathBuf;

/// Re-emit a module metadata file in canonical form
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Module metadata file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the `fmt` command.
pub fn execute(args: FmtArgs) -> Result<()> {
    let modules = modulemd::parse_from_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    info!(
        "Formatting {} document(s) from {}",
        modules.len(),
        args.input.display()
    );

    match &args.output {
        Some(path) => modulemd::emit_to_file(&modules, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let yaml = modulemd::emit_to_text(&modules).context("Failed to format documents")?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(yaml.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
