//! Walker - traversal, ignore resolution, tokenization and merge output
//!
//! A `WalkSession` owns everything one invocation needs: the traversal root,
//! the ignore pattern cache, the tokenized file records and the optional merge
//! sink. Traversal is depth-first, pre-order and lexical by file name, so the
//! merge artifact is stable for an unchanged tree.

pub mod filters;
pub mod ignores;
pub mod report;
pub mod sink;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::WalkError;
use crate::core::model::{FileRecords, TokenizedFile};
use crate::core::paths::{display_name, make_relative};
use crate::core::tokenizer::Tokenizer;
use filters::FileFilters;
use ignores::{read_root_ignore_file, IgnorePatternSet, IgnoreResolver};
use report::TokenReport;
use sink::MergeWriter;

/// Caller-controlled knobs for a walk
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Extra gitignore-style patterns, applied after the root `.gitignore`
    pub ignores: Vec<String>,
    /// Include globs; when non-empty only matching files are processed
    pub matches: Vec<String>,
    /// Announce every processed file on stderr
    pub verbose: bool,
    /// Opt-in token budget and empty-file filters
    pub filters: FileFilters,
}

/// State for a single walk over one root
#[derive(Debug)]
pub struct WalkSession {
    root: PathBuf,
    options: WalkOptions,
    patterns: Option<IgnorePatternSet>,
    records: FileRecords,
    sink: Option<MergeWriter>,
    tokenizer: Tokenizer,
}

impl WalkSession {
    /// Create a session rooted at `root`, which must be a directory
    pub fn new(root: impl AsRef<Path>, options: WalkOptions) -> Result<Self, WalkError> {
        let root = root.as_ref();
        let resolved = root.canonicalize().map_err(|source| WalkError::Root {
            path: root.to_path_buf(),
            source,
        })?;
        if !resolved.is_dir() {
            return Err(WalkError::Root {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        Ok(Self {
            root: resolved,
            options,
            patterns: None,
            records: FileRecords::new(),
            sink: None,
            tokenizer: Tokenizer::cl100k()?,
        })
    }

    /// Attach a merge sink; included files are appended to it during the walk
    pub fn with_sink(mut self, sink: MergeWriter) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Walk the tree once.
    ///
    /// The first I/O failure aborts the walk. Records collected before the
    /// failure stay in the session, and the sink is flushed and closed on
    /// every path, so partial output stays on disk.
    pub fn walk(&mut self) -> Result<(), WalkError> {
        let mut sink = self.sink.take();
        let walked = self.run(sink.as_mut());
        let closed = sink.map_or(Ok(()), MergeWriter::close);
        walked.and(closed)
    }

    #[allow(dead_code)]
    pub fn records(&self) -> &FileRecords {
        &self.records
    }

    /// Ignore patterns compiled for the last walk
    #[allow(dead_code)]
    pub fn patterns(&self) -> Option<&IgnorePatternSet> {
        self.patterns.as_ref()
    }

    pub fn total_tokens(&self) -> u64 {
        self.records.total_tokens()
    }

    /// Top-`n` ranking over the collected records
    pub fn report(&self, n: usize) -> TokenReport {
        TokenReport::new(&self.records, n)
    }

    fn run(&mut self, sink: Option<&mut MergeWriter>) -> Result<(), WalkError> {
        let output = sink.as_deref().map(MergeWriter::path);
        let resolver = self.prepare(output)?;
        self.traverse(&resolver, sink)
    }

    /// Load the root ignore file and compile the matcher for this walk
    fn prepare(&mut self, output: Option<&Path>) -> Result<IgnoreResolver, WalkError> {
        let discovered = read_root_ignore_file(&self.root)?;
        let patterns = IgnorePatternSet::assemble(&discovered, &self.options.ignores);
        debug!(
            root = %self.root.display(),
            discovered = discovered.len(),
            caller = self.options.ignores.len(),
            budget = ?self.options.filters.budget,
            skip_empty = self.options.filters.skip_empty,
            "compiled ignore patterns"
        );

        // The sink already exists on disk, so it can be resolved like any entry
        let output = output.map(|p| p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));
        let resolver = IgnoreResolver::new(&self.root, &patterns, output)?
            .with_includes(&self.options.matches)?;

        self.patterns = Some(patterns);
        Ok(resolver)
    }

    fn traverse(
        &mut self,
        resolver: &IgnoreResolver,
        mut sink: Option<&mut MergeWriter>,
    ) -> Result<(), WalkError> {
        let entries = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded(resolver, entry));

        for entry in entries {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            // Links are never followed as directories
            if entry.path_is_symlink() && path.is_dir() {
                trace!(path = %path.display(), "skipped directory symlink");
                continue;
            }

            let Some(rel) = make_relative(path, &self.root) else {
                continue;
            };
            if !resolver.selects(Path::new(&rel)) {
                continue;
            }

            let content = fs::read(path).map_err(|source| WalkError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            let tokens = self.tokenizer.encode(&content);
            if let Some(reason) = self.options.filters.rejects(&content, tokens) {
                debug!(path = %rel, tokens, reason, "filtered file");
                continue;
            }
            debug!(path = %rel, tokens, "tokenized file");
            if self.options.verbose {
                eprintln!("File: {} Tokens: {}", rel, tokens);
            }

            if let Some(sink) = sink.as_deref_mut() {
                sink.append(&rel, &content)?;
            }
            self.records
                .insert(rel, TokenizedFile::new(display_name(path), tokens));
        }

        debug!(
            files = self.records.len(),
            tokens = self.records.total_tokens(),
            "walk complete"
        );
        Ok(())
    }
}

fn is_excluded(resolver: &IgnoreResolver, entry: &DirEntry) -> bool {
    let Ok(rel) = entry.path().strip_prefix(resolver.root()) else {
        return false;
    };
    let is_dir = entry.file_type().is_dir();
    let excluded = resolver.should_exclude(rel, is_dir);
    if excluded && is_dir {
        trace!(path = %rel.display(), "pruned directory");
    }
    excluded
}
