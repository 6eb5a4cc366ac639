//! Error taxonomy for a walk session
//!
//! Every variant is fatal for the current invocation. The command layer
//! wraps these in `anyhow` context and lets `main` set the exit status.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    /// The traversal root (or the working directory it is relative to)
    /// could not be resolved.
    #[error("failed to resolve root directory {path}")]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output file {path}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read ignore file {path}")]
    ReadIgnoreFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output file {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list directory entries")]
    ListDir(#[from] walkdir::Error),

    #[error("invalid pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    /// The BPE vocabulary could not be loaded.
    #[error("tokenizer unavailable: {0}")]
    Tokenizer(String),
}
