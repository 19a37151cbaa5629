#![deny(missing_docs)]

//! # Generate Command
//!
//! Compiles the API and writes a Bruno collection directory.

use std::fs;
use std::path::{Path, PathBuf};

use wpc_core::{AppError, AppResult};

use crate::source::{build_collection, SourceArgs};
use crate::writer::write_collection;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Discovery options.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output directory of the collection.
    #[clap(long, short)]
    pub output: PathBuf,

    /// Write into an existing, non-empty directory. Files are overwritten in
    /// place; nothing is deleted.
    #[clap(long)]
    pub force: bool,
}

/// Executes the collection generation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &GenerateArgs) -> AppResult<()> {
    // 1. Guard the output directory
    ensure_writable(&args.output, args.force)?;

    // 2. Compile
    let document = build_collection(&args.source)?;

    // 3. Persist
    write_collection(&document, &args.output)?;

    println!(
        "Generated Bruno collection '{}' at {:?}",
        document.name, args.output
    );
    Ok(())
}

fn ensure_writable(dir: &Path, force: bool) -> AppResult<()> {
    if !dir.exists() {
        return Ok(());
    }
    if !dir.is_dir() {
        return Err(AppError::General(format!(
            "Output path exists and is not a directory: {:?}",
            dir
        )));
    }

    let mut entries = fs::read_dir(dir)
        .map_err(|e| AppError::General(format!("Failed to read output dir: {}", e)))?;
    if entries.next().is_some() && !force {
        return Err(AppError::General(format!(
            "Output directory {:?} is not empty (use --force to overwrite)",
            dir
        )));
    }
    Ok(())
}
