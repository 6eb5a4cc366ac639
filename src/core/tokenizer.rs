//! Token counting - BPE token counts for merged content
//!
//! Counts use the cl100k_base encoding (GPT-4 / GPT-3.5-turbo vocabulary).
//! The encoding is fixed; it is loaded once per process on first use.

use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, CoreBPE};

use crate::core::error::WalkError;

// Lazy-initialized BPE encoding (loaded once on first use)
static CL100K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| cl100k_base().map_err(|e| format!("Failed to load cl100k_base: {}", e)));

/// Name of the encoding used for every count
pub const ENCODING_NAME: &str = "cl100k_base";

/// Handle to the shared cl100k_base encoder
#[derive(Clone, Copy)]
pub struct Tokenizer {
    bpe: &'static CoreBPE,
}

impl Tokenizer {
    /// Load the cl100k_base encoding
    pub fn cl100k() -> Result<Self, WalkError> {
        match &*CL100K_BPE {
            Ok(bpe) => Ok(Self { bpe }),
            Err(e) => Err(WalkError::Tokenizer(e.clone())),
        }
    }

    /// Count tokens in raw file content.
    ///
    /// Content is treated as opaque text: invalid UTF-8 is replaced lossily and
    /// special-token markers are encoded as ordinary text.
    pub fn encode(&self, content: &[u8]) -> usize {
        if content.is_empty() {
            return 0;
        }
        let text = String::from_utf8_lossy(content);
        self.bpe.encode_ordinary(&text).len()
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("encoding", &ENCODING_NAME)
            .finish()
    }
}
