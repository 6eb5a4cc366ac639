//! Merge flow - concatenate a tree into one artifact
//!
//! The output path is resolved against the process working directory, not
//! the traversal root. When it lands inside the root it is skipped during the
//! walk, so re-running never feeds the previous artifact back in.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::error::WalkError;
use crate::walker::sink::MergeWriter;
use crate::walker::{WalkOptions, WalkSession};

/// Resolve `output` against the working directory
pub fn resolve_output(output: &Path) -> Result<PathBuf> {
    if output.is_absolute() {
        return Ok(output.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    Ok(cwd.join(output))
}

/// Walk `root` and write every included file into `output`
pub fn merge_tree(
    root: &Path,
    output: &Path,
    options: WalkOptions,
) -> Result<WalkSession, WalkError> {
    let sink = MergeWriter::create(output)?;
    let mut session = WalkSession::new(root, options)?.with_sink(sink);
    session.walk()?;
    Ok(session)
}

/// Run the merge command
pub fn run_merge(root: &Path, output: &Path, options: WalkOptions) -> Result<()> {
    let verbose = options.verbose;
    let destination = resolve_output(output)?;

    let session = merge_tree(root, &destination, options)
        .with_context(|| format!("Failed to merge files into {}", output.display()))?;

    if verbose {
        println!("Files merged into {}", output.display());
        println!("Tokens: {}", session.total_tokens());
    }

    Ok(())
}
