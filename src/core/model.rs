//! File record model
//!
//! A walk produces one `TokenizedFile` per included file. Records are kept in
//! discovery order, with a path index on the side, so that ranking ties can be
//! broken deterministically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Token count for a single included file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedFile {
    /// Base name of the file (not the full path)
    pub file_name: String,

    /// Number of tokens produced by the tokenizer
    pub token_length: usize,
}

impl TokenizedFile {
    pub fn new(file_name: impl Into<String>, token_length: usize) -> Self {
        Self {
            file_name: file_name.into(),
            token_length,
        }
    }
}

/// Insertion-ordered store of tokenized files keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct FileRecords {
    entries: Vec<(String, TokenizedFile)>,
    index: HashMap<String, usize>,
}

impl FileRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file. A path seen twice keeps its original position and
    /// takes the newer count, so totals never double-count.
    pub fn insert(&mut self, path: impl Into<String>, file: TokenizedFile) {
        let path = path.into();
        match self.index.get(&path) {
            Some(&pos) => self.entries[pos].1 = file,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, file));
            }
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, path: &str) -> Option<&TokenizedFile> {
        self.index.get(path).map(|&pos| &self.entries[pos].1)
    }

    #[allow(dead_code)]
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Records in traversal order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenizedFile)> {
        self.entries.iter().map(|(path, file)| (path.as_str(), file))
    }

    /// Relative paths in traversal order
    #[allow(dead_code)]
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    pub fn total_tokens(&self) -> u64 {
        self.entries
            .iter()
            .map(|(_, file)| file.token_length as u64)
            .sum()
    }

    /// All records sorted by token count descending, ties by path ascending
    pub fn ranked(&self) -> Vec<(&str, &TokenizedFile)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|(pa, a), (pb, b)| match b.token_length.cmp(&a.token_length) {
            Ordering::Equal => pa.cmp(pb),
            other => other,
        });
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
