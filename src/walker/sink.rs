//! Merge output sink
//!
//! Each included file is appended as
//!
//! ```text
//! File: <relative path>
//! <raw content>
//! ```
//!
//! followed by a newline. Content bytes are copied unchanged.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::WalkError;

/// Append-only writer over the merge artifact
#[derive(Debug)]
pub struct MergeWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl MergeWriter {
    /// Create (or truncate) the output file
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, WalkError> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| WalkError::CreateOutput {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one file section
    pub fn append(&mut self, rel: &str, content: &[u8]) -> Result<(), WalkError> {
        self.write_section(rel, content)
            .map_err(|source| WalkError::WriteOutput {
                path: self.path.clone(),
                source,
            })
    }

    /// Flush and release the file. Consuming `self` makes a second close
    /// impossible.
    pub fn close(mut self) -> Result<(), WalkError> {
        self.out.flush().map_err(|source| WalkError::WriteOutput {
            path: self.path.clone(),
            source,
        })
    }

    fn write_section(&mut self, rel: &str, content: &[u8]) -> std::io::Result<()> {
        self.out.write_all(b"File: ")?;
        self.out.write_all(rel.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.write_all(content)?;
        self.out.write_all(b"\n")
    }
}
