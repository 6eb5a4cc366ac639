//! Per-file filters applied after a file is tokenized
//!
//! Both filters are opt-in. A file they reject is neither merged nor counted.

/// Token budget used when `--max-budget` is given without a value
pub const DEFAULT_MAX_BUDGET: usize = 10_000;

/// Token-count window a file must fall into to be kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenBudget {
    /// Files with at least this many tokens are dropped
    pub max: Option<usize>,
    /// Files with fewer tokens than this are dropped
    pub min: Option<usize>,
}

impl TokenBudget {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { max, min }
    }

    pub fn admits(&self, tokens: usize) -> bool {
        self.max.is_none_or(|max| tokens < max) && self.min.is_none_or(|min| tokens >= min)
    }
}

/// Filters a tokenized file has to pass before it is recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileFilters {
    pub budget: TokenBudget,
    /// Drop zero-byte files
    pub skip_empty: bool,
}

impl FileFilters {
    /// Reason a file is rejected, or `None` when it is kept
    pub fn rejects(&self, content: &[u8], tokens: usize) -> Option<&'static str> {
        if self.skip_empty && content.is_empty() {
            return Some("empty");
        }
        if !self.budget.admits(tokens) {
            return Some("outside token budget");
        }
        None
    }
}
