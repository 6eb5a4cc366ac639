//! Ignore resolution
//!
//! One global rule set per walk, assembled in a fixed order:
//! 1. the implicit `.git/` pattern
//! 2. lines from the root `.gitignore` (exact lookup, never recursive)
//! 3. caller-supplied patterns
//!
//! Nested `.gitignore` files are not consulted. They are still excluded from
//! the output like every other ignore file.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::overrides::{Override, OverrideBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::WalkError;

/// Name of the ignore file read from the traversal root
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Pattern excluding the version-control metadata directory
pub const VCS_DIR_PATTERN: &str = ".git/";

/// Ordered ignore patterns for one walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePatternSet {
    patterns: Vec<String>,
}

impl IgnorePatternSet {
    /// Concatenate implicit, discovered and caller patterns, in that order
    pub fn assemble(discovered: &[String], caller: &[String]) -> Self {
        let mut patterns = Vec::with_capacity(1 + discovered.len() + caller.len());
        patterns.push(VCS_DIR_PATTERN.to_string());
        patterns.extend(discovered.iter().cloned());
        patterns.extend(caller.iter().cloned());
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Read pattern lines from `<root>/.gitignore`.
///
/// A missing file yields no lines. Comment lines (leading `#`) and blank
/// lines are dropped; other lines are kept verbatim. Bytes that are not
/// valid UTF-8 are decoded lossily per line.
pub fn read_root_ignore_file(root: &Path) -> Result<Vec<String>, WalkError> {
    let path = root.join(IGNORE_FILE_NAME);
    let content = match fs::read(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(WalkError::ReadIgnoreFile { path, source }),
    };

    Ok(content
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .collect())
}

/// Answers "is this path excluded?" for one walk
#[derive(Debug)]
pub struct IgnoreResolver {
    root: PathBuf,
    matcher: Gitignore,
    includes: Option<Override>,
    output: Option<PathBuf>,
}

impl IgnoreResolver {
    /// Compile a pattern set rooted at `root`.
    ///
    /// `output` is the absolute path of the merge destination, if any.
    pub fn new(
        root: &Path,
        patterns: &IgnorePatternSet,
        output: Option<PathBuf>,
    ) -> Result<Self, WalkError> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns.patterns() {
            builder
                .add_line(None, pattern)
                .map_err(|source| WalkError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        let matcher = builder.build().map_err(|source| WalkError::Pattern {
            pattern: patterns.patterns().join("\n"),
            source,
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            matcher,
            includes: None,
            output,
        })
    }

    /// Restrict processed files to those matching at least one glob
    pub fn with_includes(mut self, globs: &[String]) -> Result<Self, WalkError> {
        if globs.is_empty() {
            self.includes = None;
            return Ok(self);
        }

        let mut builder = OverrideBuilder::new(&self.root);
        for glob in globs {
            builder.add(glob).map_err(|source| WalkError::Pattern {
                pattern: glob.clone(),
                source,
            })?;
        }
        let includes = builder.build().map_err(|source| WalkError::Pattern {
            pattern: globs.join(","),
            source,
        })?;
        self.includes = Some(includes);
        Ok(self)
    }

    /// Whether `rel` (relative to root) is excluded from the walk.
    ///
    /// Directories are checked the same way so that a caller can prune them.
    /// The ignore-file suffix rule only applies to files.
    pub fn should_exclude(&self, rel: &Path, is_dir: bool) -> bool {
        if self.is_output(rel) || (!is_dir && is_ignore_file(rel)) {
            return true;
        }
        self.matcher
            .matched_path_or_any_parents(rel, is_dir)
            .is_ignore()
    }

    /// Whether a file that survived `should_exclude` is selected by the
    /// include globs. Always true without globs.
    pub fn selects(&self, rel: &Path) -> bool {
        match &self.includes {
            Some(includes) => includes.matched(rel, false).is_whitelist(),
            None => true,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_output(&self, rel: &Path) -> bool {
        self.output
            .as_deref()
            .is_some_and(|output| self.root.join(rel) == output)
    }
}

fn is_ignore_file(rel: &Path) -> bool {
    rel.to_string_lossy().ends_with(IGNORE_FILE_NAME)
}
