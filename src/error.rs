//! Error types for scanning, annotating, and report output

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: any of these aborts the run before a report is written.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report '{}': {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize project structure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-file annotation failures. These are logged and the pass continues.
#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;
