//! # Validate Command Implementation
//!
//! Implements `modulemd validate`, which parses one or more module metadata
//! files and reports each document found. Every file is checked even when an
//! earlier one fails; the command exits with an error if any file failed.
//!
//! This command never modifies any file.

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use modulemd::output::{emoji, status_line, OutputConfig, Status};
use modulemd::ModuleDocument;

/// Parse module metadata files and report the documents they contain
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Module metadata files to validate
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Only print failures
    #[arg(short, long)]
    pub quiet: bool,
}

/// Label a document as `name:stream`, falling back to its position.
fn document_label(index: usize, module: &ModuleDocument) -> String {
    match (module.name(), module.stream()) {
        (Some(name), Some(stream)) => format!("{}:{}", name, stream),
        (Some(name), None) => name.to_string(),
        _ => format!("document {}", index + 1),
    }
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let mut failures = 0usize;

    for path in &args.files {
        match modulemd::parse_from_file(path) {
            Ok(modules) => {
                if args.quiet {
                    continue;
                }
                println!(
                    "{}",
                    status_line(
                        &out,
                        Status::Ok,
                        &format!("{}: {} document(s)", path.display(), modules.len())
                    )
                );
                for (index, module) in modules.iter().enumerate() {
                    let version = match module.version() {
                        0 => String::new(),
                        v => format!(" version {}", v),
                    };
                    println!(
                        "   {} {}{} (mdversion {})",
                        emoji(&out, "📦", "-"),
                        document_label(index, module),
                        version,
                        module.mdversion()
                    );
                }
            }
            Err(e) => {
                failures += 1;
                println!(
                    "{}",
                    status_line(&out, Status::Error, &format!("{}: {}", path.display(), e))
                );
            }
        }
    }

    if failures > 0 {
        bail!(
            "{} of {} file(s) failed validation",
            failures,
            args.files.len()
        );
    }

    Ok(())
}
