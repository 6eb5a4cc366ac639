//! Tokens flow - rank files by token count without writing anything

use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::core::error::WalkError;
use crate::core::render::{RenderConfig, Renderer};
use crate::walker::report::TokenReport;
use crate::walker::{WalkOptions, WalkSession};

/// Walk `root` and build a top-`count` report
pub fn count_tokens(
    root: &Path,
    count: usize,
    options: WalkOptions,
) -> Result<TokenReport, WalkError> {
    let mut session = WalkSession::new(root, options)?;
    session.walk()?;
    Ok(session.report(count))
}

/// Run the tokens command
pub fn run_tokens(
    root: &Path,
    count: usize,
    options: WalkOptions,
    config: RenderConfig,
) -> Result<()> {
    let report = count_tokens(root, count, options)
        .with_context(|| format!("Failed to count tokens under {}", root.display()))?;

    if report.is_empty() {
        eprintln!("No files found under {}", root.display());
    }

    let renderer = Renderer::with_config(config);
    renderer
        .render_to(&report, io::stdout().lock())
        .context("Failed to write report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_count_tokens_ranks_descending() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("small.txt"), "a").unwrap();
        fs::write(
            temp.path().join("large.txt"),
            "a much longer sentence with many more tokens in it",
        )
        .unwrap();
        fs::write(temp.path().join("medium.txt"), "hello world").unwrap();

        let report = count_tokens(temp.path(), 10, WalkOptions::default()).unwrap();

        let names: Vec<_> = report.top.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["large.txt", "medium.txt", "small.txt"]);
        let sum: u64 = report.top.iter().map(|f| f.tokens as u64).sum();
        assert_eq!(report.total, sum);
    }

    #[test]
    fn test_count_tokens_is_idempotent() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.rs"), "fn a() {}").unwrap();
        fs::write(temp.path().join("b.rs"), "fn b() {}").unwrap();
        fs::write(temp.path().join("c.md"), "# Title").unwrap();

        let first = count_tokens(temp.path(), 10, WalkOptions::default()).unwrap();
        let second = count_tokens(temp.path(), 10, WalkOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_count_tokens_honors_ignores() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("vendor")).unwrap();
        fs::write(temp.path().join("vendor/dep.rs"), "fn dep() {}").unwrap();
        fs::write(temp.path().join("main.rs"), "fn main() {}").unwrap();

        let options = WalkOptions {
            ignores: vec!["vendor/".to_string()],
            ..Default::default()
        };
        let report = count_tokens(temp.path(), 10, options).unwrap();

        assert_eq!(report.files, 1);
        assert_eq!(report.top[0].path, "main.rs");
    }
}
