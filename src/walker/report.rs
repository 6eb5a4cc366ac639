//! Token report over a completed walk

use serde::{Deserialize, Serialize};

use crate::core::model::FileRecords;

/// Default number of files shown in a ranking
pub const DEFAULT_TOP_N: usize = 10;

/// One ranked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedFile {
    /// Path relative to root
    pub path: String,
    /// Display name (base name)
    pub file_name: String,
    pub tokens: usize,
}

/// Top-N ranking plus the grand total over all records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReport {
    pub top: Vec<RankedFile>,
    /// Number of files counted (not just the ranked ones)
    pub files: usize,
    pub total: u64,
}

impl TokenReport {
    /// Build a report holding at most `n` files, largest first.
    /// Ties are ordered by path so repeated runs agree.
    pub fn new(records: &FileRecords, n: usize) -> Self {
        let top = records
            .ranked()
            .into_iter()
            .take(n)
            .map(|(path, file)| RankedFile {
                path: path.to_string(),
                file_name: file.file_name.clone(),
                tokens: file.token_length,
            })
            .collect();

        Self {
            top,
            files: records.len(),
            total: records.total_tokens(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0
    }
}
