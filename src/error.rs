//! Structural errors: the corpus is not in a checkable state and the pass stops.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Missing reviewers index: {}", path.display())]
    MissingIndex { path: PathBuf },

    #[error("Invalid reviewers index: {} ({reason})", path.display())]
    InvalidIndex { path: PathBuf, reason: String },

    #[error("Invalid reviewer id in index: {entry}")]
    InvalidReviewerId { entry: String },

    #[error("Duplicate reviewer id in index: '{id}'")]
    DuplicateReviewerId { id: String },

    #[error("Missing reviewer file for id '{id}': {}", path.display())]
    MissingReviewerFile { id: String, path: PathBuf },

    #[error("Invalid reviewer file for id '{id}': {} (expected a JSON object)", path.display())]
    InvalidReviewerFile { id: String, path: PathBuf },

    #[error("Invalid tasting document: {} ({reason})", path.display())]
    InvalidTasting { path: PathBuf, reason: String },

    #[error("ERROR: missing schema: {}", path.display())]
    MissingSchema { path: PathBuf },

    #[error("ERROR: invalid schema: {} ({message})", path.display())]
    InvalidSchema { path: PathBuf, message: String },

    #[error("ERROR: missing reviewers dir: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("ERROR: no reviewer files found (expected at least one .json in {})", dir.display())]
    NoReviewerFiles { dir: PathBuf },

    #[error("unable to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse json '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("unable to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl AuditError {
    /// Structural failures all terminate with the same status.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
