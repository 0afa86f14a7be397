//! Errors that abort an analysis run
//!
//! Everything else (unreadable files, failed stats, unreadable
//! subdirectories) is recovered where it happens and never reaches here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("cannot read project root {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    ManifestMalformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid secret pattern '{pattern}': {source}")]
    InvalidSecretPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{0} thread panicked during analysis")]
    WorkerPanicked(&'static str),
}

pub type AnalyzeResult<T> = Result<T, AnalyzeError>;
