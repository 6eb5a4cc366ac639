//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Walk error taxonomy
//! - Tokenized file records
//! - Path normalization utilities
//! - Report rendering
//! - Token counting with the cl100k_base encoding

pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
