//! codemerge - merge a source tree into one file and count its LLM tokens
//!
//! codemerge provides:
//! - Lexical, depth-first traversal with gitignore-style exclusion
//! - A single merge artifact with per-file path headers
//! - cl100k_base token counts per file, ranked, with a grand total

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod flows;
mod walker;

fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli)
}
