//! Corpus load error types.
//!
//! Structural absence (a dataset directory missing its metrics or results
//! file) is not an error; only unreadable paths and malformed JSON are.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading the result corpus.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The outputs root does not exist or is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A directory or file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The metrics file is not a valid metrics object.
    #[error("malformed metrics file {}: {source}", .path.display())]
    Metrics {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A line of the results file is not a JSON object.
    #[error("malformed results file {} at line {line}: {source}", .path.display())]
    Results {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// The file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::NotADirectory(path)
            | LoadError::Io { path, .. }
            | LoadError::Metrics { path, .. }
            | LoadError::Results { path, .. } => path,
        }
    }
}
