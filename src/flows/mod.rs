//! Flows module - Command entry points built on the walker
//!
//! Provides:
//! - merge: Concatenate the tree into one artifact
//! - tokens: Rank files by token count

pub mod merge;
pub mod tokens;
